use crate::core::loader::ArtifactBundle;
use crate::core::{aggregator, scaling, validator};
use crate::domain::model::{FeatureVector, PredictionResult};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Request-side entry point. Cloning is cheap and every clone shares the same
/// read-only [`ArtifactBundle`].
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    bundle: Arc<ArtifactBundle>,
}

impl ScreeningEngine {
    pub fn new(bundle: ArtifactBundle) -> Self {
        Self {
            bundle: Arc::new(bundle),
        }
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Validate a raw `{"features": [...]}` payload and score it.
    pub fn predict_payload(&self, payload: &Value) -> Result<PredictionResult> {
        let features = validator::validate(payload).inspect_err(|e| {
            tracing::debug!("Rejected payload: {}", e);
        })?;
        self.predict(&features)
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let scaled = scaling::scale(self.bundle.scaler.as_ref(), features)?;
        let raw = self.bundle.ensemble.predict_all(&scaled)?;
        Ok(aggregator::aggregate(raw.logistic, raw.random_forest, raw.svm))
    }
}
