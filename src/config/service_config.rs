use crate::core::loader::ArtifactNames;
use crate::utils::error::{Result, ScreenError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub service: ServiceSection,
    pub artifacts: ArtifactsSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub name: String,
    pub bind_address: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: "heart-screen".to_string(),
            bind_address: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsSection {
    /// Directory, or a `.zip` bundle, holding the four artifacts.
    pub location: String,
    /// Base for a relative `location`, e.g. the unpack directory of a packaged build.
    pub base_dir: Option<String>,
    pub scaler: String,
    pub logistic: String,
    pub random_forest: String,
    pub svm: String,
}

impl Default for ArtifactsSection {
    fn default() -> Self {
        let names = ArtifactNames::default();
        Self {
            location: "backend/models".to_string(),
            base_dir: None,
            scaler: names.scaler,
            logistic: names.logistic,
            random_forest: names.random_forest,
            svm: names.svm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScreenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScreenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HEART_SCREEN_HOME})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScreenError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Where the artifact store lives, with `base_dir` applied to relative locations.
    pub fn artifact_location(&self) -> PathBuf {
        let location = Path::new(&self.artifacts.location);
        match &self.artifacts.base_dir {
            Some(base) if location.is_relative() && !base.trim().is_empty() => {
                Path::new(base).join(location)
            }
            _ => location.to_path_buf(),
        }
    }

    pub fn artifact_names(&self) -> ArtifactNames {
        ArtifactNames {
            scaler: self.artifacts.scaler.clone(),
            logistic: self.artifacts.logistic.clone(),
            random_forest: self.artifacts.random_forest.clone(),
            svm: self.artifacts.svm.clone(),
        }
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("service.bind_address", &self.service.bind_address)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("service.name", &self.service.name)?;
        self.bind_address()?;

        validation::validate_path("artifacts.location", &self.artifacts.location)?;
        for (field, file) in [
            ("artifacts.scaler", &self.artifacts.scaler),
            ("artifacts.logistic", &self.artifacts.logistic),
            ("artifacts.random_forest", &self.artifacts.random_forest),
            ("artifacts.svm", &self.artifacts.svm),
        ] {
            validation::validate_file_extension(field, file, &["json"])?;
        }

        validation::validate_one_of("logging.format", &self.logging.format, &["compact", "json"])?;
        validation::validate_one_of(
            "logging.level",
            &self.logging.level,
            &["trace", "debug", "info", "warn", "error"],
        )?;

        tracing::debug!("✅ Service configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config.service.bind_address, "127.0.0.1:5000");
        assert_eq!(config.artifact_location(), PathBuf::from("backend/models"));
        assert_eq!(config.artifact_names(), ArtifactNames::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[service]
name = "screening"
bind_address = "0.0.0.0:8080"

[artifacts]
location = "models.zip"
base_dir = "/opt/heart-screen"
svm = "svc_linear.json"

[logging]
level = "debug"
format = "json"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.name, "screening");
        assert_eq!(config.bind_address().unwrap().port(), 8080);
        assert_eq!(
            config.artifact_location(),
            PathBuf::from("/opt/heart-screen/models.zip")
        );
        assert_eq!(config.artifact_names().svm, "svc_linear.json");
        assert_eq!(config.artifact_names().scaler, "scaler.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HEART_SCREEN_TEST_HOME", "/srv/models");

        let toml_content = r#"
[artifacts]
base_dir = "${HEART_SCREEN_TEST_HOME}"
location = "${HEART_SCREEN_UNSET_VARIABLE}"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.artifacts.base_dir.as_deref(), Some("/srv/models"));
        assert_eq!(config.artifacts.location, "${HEART_SCREEN_UNSET_VARIABLE}");

        std::env::remove_var("HEART_SCREEN_TEST_HOME");
    }

    #[test]
    fn test_absolute_location_ignores_base_dir() {
        let mut config = ServiceConfig::default();
        config.artifacts.location = "/data/models".to_string();
        config.artifacts.base_dir = Some("/opt".to_string());
        assert_eq!(config.artifact_location(), PathBuf::from("/data/models"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServiceConfig::default();
        config.service.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.artifacts.logistic = "logistic_model.pkl".to_string();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nname = \"file-test\"\n")
            .unwrap();

        let config = ServiceConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.service.name, "file-test");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = ServiceConfig::from_toml_str("[service\nname =").unwrap_err();
        assert!(matches!(err, ScreenError::ConfigValidationError { .. }));
    }
}
