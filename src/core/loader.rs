use crate::adapters::models::ArtifactDocument;
use crate::core::ensemble::Ensemble;
use crate::domain::model::{ModelName, FEATURE_COUNT};
use crate::domain::ports::{ArtifactStore, Classifier, FeatureScaler};
use crate::utils::error::{Result, ScreenError};
use chrono::{DateTime, Utc};

/// File names of the four artifacts inside a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub scaler: String,
    pub logistic: String,
    pub random_forest: String,
    pub svm: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            scaler: "scaler.json".to_string(),
            logistic: "logistic_model.json".to_string(),
            random_forest: "random_forest.json".to_string(),
            svm: "svm_model.json".to_string(),
        }
    }
}

impl ArtifactNames {
    fn classifier(&self, model: ModelName) -> &str {
        match model {
            ModelName::Logistic => &self.logistic,
            ModelName::RandomForest => &self.random_forest,
            ModelName::Svm => &self.svm,
        }
    }
}

/// Everything a prediction needs, loaded once and never mutated afterwards.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub scaler: Box<dyn FeatureScaler>,
    pub ensemble: Ensemble,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
}

pub struct ArtifactLoader {
    store: Box<dyn ArtifactStore>,
    names: ArtifactNames,
}

impl ArtifactLoader {
    pub fn new(store: Box<dyn ArtifactStore>, names: ArtifactNames) -> Self {
        Self { store, names }
    }

    /// Load all four artifacts or fail. There is no partially loaded state.
    pub async fn load(&self) -> Result<ArtifactBundle> {
        let source = self.store.describe();
        tracing::info!("📦 Loading model artifacts from {}", source);

        let scaler = match self.read_document(&self.names.scaler).await? {
            ArtifactDocument::StandardScaler(scaler) => {
                scaler.check().map_err(|reason| corrupt(&self.names.scaler, reason))?;
                scaler
            }
            other => return Err(wrong_kind(&self.names.scaler, "standard_scaler", &other)),
        };
        if scaler.n_features() != FEATURE_COUNT {
            return Err(width_mismatch(&self.names.scaler, scaler.n_features()));
        }

        let ensemble = Ensemble {
            logistic: self.load_classifier(ModelName::Logistic).await?,
            random_forest: self.load_classifier(ModelName::RandomForest).await?,
            svm: self.load_classifier(ModelName::Svm).await?,
        };

        tracing::info!("✅ Loaded scaler and {} classifiers", ModelName::ALL.len());
        Ok(ArtifactBundle {
            scaler: Box::new(scaler),
            ensemble,
            loaded_at: Utc::now(),
            source,
        })
    }

    async fn read_document(&self, name: &str) -> Result<ArtifactDocument> {
        let bytes = self.store.read_artifact(name).await?;
        serde_json::from_slice(&bytes).map_err(|e| corrupt(name, e.to_string()))
    }

    async fn load_classifier(&self, model: ModelName) -> Result<Box<dyn Classifier>> {
        let name = self.names.classifier(model);
        let document = self.read_document(name).await?;

        let classifier: Box<dyn Classifier> = match (model, document) {
            (ModelName::Logistic, ArtifactDocument::LogisticRegression(m)) => {
                m.check().map_err(|reason| corrupt(name, reason))?;
                tracing::debug!("{}: {} coefficients", name, m.coef.len());
                Box::new(m)
            }
            (ModelName::RandomForest, ArtifactDocument::RandomForest(m)) => {
                m.check().map_err(|reason| corrupt(name, reason))?;
                tracing::info!("🌲 {}: {} trees", name, m.trees.len());
                Box::new(m)
            }
            (ModelName::Svm, ArtifactDocument::Svc(m)) => {
                m.check().map_err(|reason| corrupt(name, reason))?;
                tracing::info!("📐 {}: {} support vectors", name, m.support_vectors.len());
                Box::new(m)
            }
            (model, other) => {
                let expected = match model {
                    ModelName::Logistic => "logistic_regression",
                    ModelName::RandomForest => "random_forest",
                    ModelName::Svm => "svc",
                };
                return Err(wrong_kind(name, expected, &other));
            }
        };

        if classifier.n_features() != FEATURE_COUNT {
            return Err(width_mismatch(name, classifier.n_features()));
        }
        Ok(classifier)
    }
}

fn corrupt(name: &str, reason: impl Into<String>) -> ScreenError {
    ScreenError::ArtifactCorrupt {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn wrong_kind(name: &str, expected: &str, found: &ArtifactDocument) -> ScreenError {
    corrupt(
        name,
        format!("expected a {} artifact, found {}", expected, found.kind()),
    )
}

fn width_mismatch(name: &str, actual: usize) -> ScreenError {
    corrupt(
        name,
        format!("fit on {} features, expected {}", actual, FEATURE_COUNT),
    )
}
