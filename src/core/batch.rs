use crate::core::engine::ScreeningEngine;
use crate::core::validator::FEATURES_KEY;
use crate::domain::model::{PredictionResponse, FEATURE_NAMES};
use crate::utils::error::{Result, ScreenError};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{Read, Write};

#[derive(Debug, Serialize)]
struct BatchRow {
    record: usize,
    lr_pred: u8,
    rf_pred: u8,
    svm_pred: u8,
    lr_prob: f64,
    rf_prob: f64,
    svm_prob: f64,
}

impl BatchRow {
    fn new(record: usize, r: PredictionResponse) -> Self {
        Self {
            record,
            lr_pred: r.lr_pred,
            rf_pred: r.rf_pred,
            svm_pred: r.svm_pred,
            lr_prob: r.lr_prob,
            rf_prob: r.rf_prob,
            svm_prob: r.svm_prob,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub scored: usize,
    pub rejected: usize,
}

/// Score every row of a CSV whose header names the 13 feature columns.
///
/// Column order in the file does not matter and extra columns are ignored.
/// Rows that fail validation are skipped with a warning; a model failure
/// aborts the batch.
pub fn screen_csv<R: Read, W: Write>(
    engine: &ScreeningEngine,
    input: R,
    output: W,
) -> Result<BatchSummary> {
    // 欄位數不齊的列留給下面逐列處理
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let columns = FEATURE_NAMES
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| ScreenError::MissingColumn {
                    column: name.to_string(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut writer = csv::Writer::from_writer(output);
    let mut summary = BatchSummary::default();

    for (idx, row) in reader.records().enumerate() {
        let record = idx + 1;
        let row = row?;
        let Some(features) = columns
            .iter()
            .map(|&col| row.get(col).map(|cell| Value::String(cell.to_string())))
            .collect::<Option<Vec<Value>>>()
        else {
            tracing::warn!(
                "⚠️ Skipping record {}: expected {} fields, found {}",
                record,
                headers.len(),
                row.len()
            );
            summary.rejected += 1;
            continue;
        };

        match engine.predict_payload(&json!({ FEATURES_KEY: features })) {
            Ok(result) => {
                writer.serialize(BatchRow::new(record, result.to_response()))?;
                summary.scored += 1;
            }
            Err(e) if e.is_client_error() => {
                tracing::warn!("⚠️ Skipping record {}: {}", record, e);
                summary.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    writer.flush()?;
    tracing::info!(
        "✅ Screened {} records ({} rejected)",
        summary.scored,
        summary.rejected
    );
    Ok(summary)
}
