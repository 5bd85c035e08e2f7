//! Native evaluators for the exported scikit-learn artifacts.
//!
//! Every artifact is a JSON document tagged by `kind`. The training pipeline
//! exports the fitted attributes verbatim (coefficients, tree arrays, support
//! vectors) and these types reproduce the library's decision rules over them.

pub mod forest;
pub mod logistic;
pub mod scaler;
pub mod svm;

use serde::Deserialize;

pub use forest::RandomForest;
pub use logistic::LogisticRegression;
pub use scaler::StandardScaler;
pub use svm::SupportVectorClassifier;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactDocument {
    StandardScaler(StandardScaler),
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
    Svc(SupportVectorClassifier),
}

impl ArtifactDocument {
    pub fn kind(&self) -> &'static str {
        match self {
            ArtifactDocument::StandardScaler(_) => "standard_scaler",
            ArtifactDocument::LogisticRegression(_) => "logistic_regression",
            ArtifactDocument::RandomForest(_) => "random_forest",
            ArtifactDocument::Svc(_) => "svc",
        }
    }
}

pub(crate) fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// Only binary models fit on the 0/1 target are accepted.
pub(crate) fn check_classes(classes: &[i64]) -> Result<(), String> {
    if classes != [0, 1] {
        return Err(format!("expected classes [0, 1], found {:?}", classes));
    }
    Ok(())
}

pub(crate) fn check_finite(field: &str, values: &[f64]) -> Result<(), String> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(format!("{}[{}] is not finite", field, idx)),
        None => Ok(()),
    }
}

/// Logistic function in the form that never overflows `exp`.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
