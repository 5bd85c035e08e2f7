pub mod service_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use service_config::ServiceConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "heart-screen")]
#[command(about = "Heart disease screening service backed by a three-model ensemble")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Artifact directory or .zip bundle (overrides artifacts.location)
    #[arg(long)]
    pub artifacts: Option<String>,

    /// Listen address (overrides service.bind_address)
    #[arg(long)]
    pub bind: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn resolve(&self) -> crate::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(location) = &self.artifacts {
            config.artifacts.location = location.clone();
            config.artifacts.base_dir = None;
        }
        if let Some(bind) = &self.bind {
            config.service.bind_address = bind.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }

        Ok(config)
    }
}
