pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::service_config::ServiceConfig;

pub use adapters::storage::{open_store, DirectoryStore, ZipBundleStore};
pub use crate::core::engine::ScreeningEngine;
pub use crate::core::loader::{ArtifactBundle, ArtifactLoader, ArtifactNames};
pub use domain::model::{
    FeatureVector, PredictionResponse, PredictionResult, FEATURE_COUNT, FEATURE_NAMES,
};
pub use utils::error::{Result, ScreenError};

/// Load the configured artifact set. Startup must stop if this fails.
pub async fn load_engine(config: &ServiceConfig) -> Result<ScreeningEngine> {
    let store = open_store(&config.artifact_location());
    let bundle = ArtifactLoader::new(store, config.artifact_names())
        .load()
        .await?;
    Ok(ScreeningEngine::new(bundle))
}
