use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Artifact '{name}' not found at {location}")]
    ArtifactMissing { name: String, location: String },

    #[error("Artifact '{name}' is corrupt: {reason}")]
    ArtifactCorrupt { name: String, reason: String },

    #[error("Invalid input: 'features' key is missing in the request data.")]
    MissingFeaturesKey,

    #[error("Invalid input: Expected {expected} features, but got {actual}.")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("Invalid input: 'features' must be a list of numbers.")]
    FeaturesNotSequence,

    #[error("Invalid input: feature '{name}' at position {index} is not a number.")]
    NonNumericFeature { index: usize, name: &'static str },

    #[error("Invalid input: feature '{name}' at position {index} is too large to scale.")]
    FeatureOutOfRange { index: usize, name: &'static str },

    #[error("Input is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid input: request body is not valid JSON ({message}).")]
    MalformedPayload { message: String },

    #[error("Model '{model}' failed: {message}")]
    InferenceError { model: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ScreenError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Input,
    Inference,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScreenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScreenError::ArtifactMissing { .. }
            | ScreenError::ArtifactCorrupt { .. }
            | ScreenError::ZipError(_) => ErrorCategory::Artifact,
            ScreenError::MissingFeaturesKey
            | ScreenError::FeatureCountMismatch { .. }
            | ScreenError::FeaturesNotSequence
            | ScreenError::NonNumericFeature { .. }
            | ScreenError::FeatureOutOfRange { .. }
            | ScreenError::MalformedPayload { .. }
            | ScreenError::MissingColumn { .. }
            | ScreenError::CsvError(_) => ErrorCategory::Input,
            ScreenError::InferenceError { .. } => ErrorCategory::Inference,
            ScreenError::ConfigError { .. }
            | ScreenError::InvalidConfigValueError { .. }
            | ScreenError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ScreenError::IoError(_) | ScreenError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        if matches!(self, ScreenError::CsvError(_) | ScreenError::MissingColumn { .. }) {
            return ErrorSeverity::Medium;
        }
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Inference => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Artifact | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 呼叫端造成的錯誤 (對應 HTTP 4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScreenError::MissingFeaturesKey
                | ScreenError::FeatureCountMismatch { .. }
                | ScreenError::FeaturesNotSequence
                | ScreenError::NonNumericFeature { .. }
                | ScreenError::FeatureOutOfRange { .. }
                | ScreenError::MalformedPayload { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Artifact => format!("Model artifacts could not be loaded: {}", self),
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::Inference => {
                "An internal error occurred while computing the prediction.".to_string()
            }
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScreenError::ArtifactMissing { .. } => {
                "Check artifacts.location and that all four exported model files are deployed"
            }
            ScreenError::ArtifactCorrupt { .. } | ScreenError::ZipError(_) => {
                "Re-export the artifacts from the training pipeline"
            }
            ScreenError::MissingFeaturesKey
            | ScreenError::FeatureCountMismatch { .. }
            | ScreenError::FeaturesNotSequence
            | ScreenError::NonNumericFeature { .. }
            | ScreenError::FeatureOutOfRange { .. }
            | ScreenError::MalformedPayload { .. } => {
                "Send {\"features\": [age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang, oldpeak, slope, ca, thal]}"
            }
            ScreenError::MissingColumn { .. } | ScreenError::CsvError(_) => {
                "Make sure the CSV header names all 13 feature columns"
            }
            ScreenError::InferenceError { .. } => {
                "Inspect the service logs; retrying the same record reproduces the failure"
            }
            ScreenError::ConfigError { .. }
            | ScreenError::InvalidConfigValueError { .. }
            | ScreenError::ConfigValidationError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            ScreenError::IoError(_) | ScreenError::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_low_severity_input() {
        let err = ScreenError::FeatureCountMismatch {
            expected: 13,
            actual: 5,
        };
        assert!(err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(
            err.to_string(),
            "Invalid input: Expected 13 features, but got 5."
        );
    }

    #[test]
    fn test_artifact_errors_are_critical() {
        let err = ScreenError::ArtifactMissing {
            name: "svm_model.json".to_string(),
            location: "backend/models".to_string(),
        };
        assert!(!err.is_client_error());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_inference_error_message_is_generic() {
        let err = ScreenError::InferenceError {
            model: "svm".to_string(),
            message: "probability NaN".to_string(),
        };
        assert!(!err.is_client_error());
        assert!(!err.user_friendly_message().contains("NaN"));
    }
}
