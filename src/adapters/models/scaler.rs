use super::check_finite;
use crate::domain::model::{FeatureVector, ScaledFeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::domain::ports::FeatureScaler;
use serde::Deserialize;

/// Fitted `StandardScaler`: `(x - mean) / scale`.
///
/// `mean` is absent when the scaler was fit without centering and `scale` is
/// absent when it was fit without scaling.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn check(&self) -> Result<(), String> {
        if let Some(mean) = &self.mean {
            if mean.len() != FEATURE_COUNT {
                return Err(format!(
                    "mean has {} entries, expected {}",
                    mean.len(),
                    FEATURE_COUNT
                ));
            }
            check_finite("mean", mean)?;
        }

        if let Some(scale) = &self.scale {
            if scale.len() != FEATURE_COUNT {
                return Err(format!(
                    "scale has {} entries, expected {}",
                    scale.len(),
                    FEATURE_COUNT
                ));
            }
            check_finite("scale", scale)?;
            if let Some(idx) = scale.iter().position(|s| *s == 0.0) {
                return Err(format!("scale[{}] is zero", idx));
            }
        }

        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(format!(
                    "feature_names {:?} do not match the expected order {:?}",
                    names, FEATURE_NAMES
                ));
            }
        }

        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean
            .as_ref()
            .or(self.scale.as_ref())
            .map(Vec::len)
            .unwrap_or(FEATURE_COUNT)
    }

    fn transform(&self, x: &FeatureVector) -> ScaledFeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in x.as_slice().iter().enumerate() {
            let centered = match &self.mean {
                Some(mean) => value - mean[i],
                None => *value,
            };
            out[i] = match &self.scale {
                Some(scale) => centered / scale[i],
                None => centered,
            };
        }
        ScaledFeatureVector::new(out)
    }
}
