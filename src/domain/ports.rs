use crate::domain::model::{FeatureVector, ScaledFeatureVector};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// A pre-fit binary classifier in its native convention (1 = disease).
pub trait Classifier: Send + Sync + Debug {
    fn n_features(&self) -> usize;
    fn predict_label(&self, x: &ScaledFeatureVector) -> Result<u8>;
    fn predict_probability(&self, x: &ScaledFeatureVector) -> Result<f64>;
}

/// The fitted per-feature transform applied before any classifier.
pub trait FeatureScaler: Send + Sync + Debug {
    fn n_features(&self) -> usize;
    fn transform(&self, x: &FeatureVector) -> ScaledFeatureVector;
}

/// Read-only source of serialized artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    fn describe(&self) -> String;
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>>;
}
