use serde::{Deserialize, Serialize};
use std::fmt;

pub const FEATURE_COUNT: usize = 13;

/// Canonical column order used when the scaler and the classifiers were fit.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// One clinical record in canonical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }
}

/// A [`FeatureVector`] after the training-time standardization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatureVector([f64; FEATURE_COUNT]);

impl ScaledFeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelName {
    Logistic,
    RandomForest,
    Svm,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [ModelName::Logistic, ModelName::RandomForest, ModelName::Svm];
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelName::Logistic => "logistic_regression",
            ModelName::RandomForest => "random_forest",
            ModelName::Svm => "svm",
        };
        f.write_str(name)
    }
}

/// Classifier output in the training convention: label 1 means disease.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVerdict {
    pub label: u8,
    pub disease_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlook {
    Healthy,
    Disease,
}

impl Outlook {
    /// External label convention: 1 = healthy.
    pub fn code(&self) -> u8 {
        match self {
            Outlook::Healthy => 1,
            Outlook::Disease => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelVerdict {
    pub outlook: Outlook,
    /// Percent chance of being healthy, two decimals, within [0, 100].
    pub healthy_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub logistic: ModelVerdict,
    pub random_forest: ModelVerdict,
    pub svm: ModelVerdict,
}

impl PredictionResult {
    pub fn to_response(&self) -> PredictionResponse {
        PredictionResponse {
            lr_pred: self.logistic.outlook.code(),
            rf_pred: self.random_forest.outlook.code(),
            svm_pred: self.svm.outlook.code(),
            lr_prob: self.logistic.healthy_percent,
            rf_prob: self.random_forest.healthy_percent,
            svm_prob: self.svm.healthy_percent,
        }
    }
}

/// Wire shape of a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub lr_pred: u8,
    pub rf_pred: u8,
    pub svm_pred: u8,
    pub lr_prob: f64,
    pub rf_prob: f64,
    pub svm_prob: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_lookup_by_name() {
        let fv = FeatureVector::new([
            65.0, 0.0, 2.0, 155.0, 269.0, 0.0, 1.0, 148.0, 0.0, 0.8, 2.0, 0.0, 2.0,
        ]);
        assert_eq!(fv.get("age"), Some(65.0));
        assert_eq!(fv.get("oldpeak"), Some(0.8));
        assert_eq!(fv.get("thal"), Some(2.0));
        assert_eq!(fv.get("weight"), None);
    }

    #[test]
    fn test_response_uses_healthy_convention() {
        let result = PredictionResult {
            logistic: ModelVerdict {
                outlook: Outlook::Healthy,
                healthy_percent: 87.5,
            },
            random_forest: ModelVerdict {
                outlook: Outlook::Disease,
                healthy_percent: 12.0,
            },
            svm: ModelVerdict {
                outlook: Outlook::Healthy,
                healthy_percent: 50.0,
            },
        };

        let response = result.to_response();
        assert_eq!(response.lr_pred, 1);
        assert_eq!(response.rf_pred, 0);
        assert_eq!(response.svm_prob, 50.0);

        let json = serde_json::to_value(&response).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
    }
}
