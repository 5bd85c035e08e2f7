pub mod aggregator;
pub mod batch;
pub mod engine;
pub mod ensemble;
pub mod loader;
pub mod scaling;
pub mod validator;

pub use crate::domain::model::{FeatureVector, PredictionResult, RawVerdict, ScaledFeatureVector};
pub use crate::domain::ports::{ArtifactStore, Classifier, FeatureScaler};
pub use crate::utils::error::Result;
