use crate::domain::model::{FeatureVector, ScaledFeatureVector, FEATURE_NAMES};
use crate::domain::ports::FeatureScaler;
use crate::utils::error::{Result, ScreenError};

/// Apply the fitted transform. The scaler's width was checked at load time.
///
/// A finite input can still overflow once centered and divided; such a record
/// is rejected before any model sees it.
pub fn scale(scaler: &dyn FeatureScaler, features: &FeatureVector) -> Result<ScaledFeatureVector> {
    let scaled = scaler.transform(features);
    tracing::trace!(raw = ?features.as_slice(), scaled = ?scaled.as_slice(), "scaled record");

    if let Some(index) = scaled.as_slice().iter().position(|v| !v.is_finite()) {
        return Err(ScreenError::FeatureOutOfRange {
            index,
            name: FEATURE_NAMES[index],
        });
    }
    Ok(scaled)
}
