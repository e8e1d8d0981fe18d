//! Application configuration
use crate::error::{AppError, Result};
use puff_core::QualityTier;
use puff_downloader::ConverterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "puff.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PuffConfig {
    #[serde(default = "default_converter")]
    pub converter: ConverterSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_download")]
    pub download: DownloadSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConverterSettings {
    #[serde(default = "default_audio_endpoint")]
    pub audio_endpoint: String,

    #[serde(default = "default_video_endpoint")]
    pub video_endpoint: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadSettings {
    #[serde(default)]
    pub default_quality: QualityTier,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl PuffConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `puff.toml` in the working
    /// directory is read if present. Environment variables prefixed with
    /// `PUFF_` override the file, with `__` between section and key
    /// (`PUFF_STORAGE__DOWNLOAD_DIR`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// `load` with an explicit environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("converter.audio_endpoint", &self.converter.audio_endpoint),
            ("converter.video_endpoint", &self.converter.video_endpoint),
        ] {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "{name} must be an http(s) URL, got {endpoint:?}"
                )));
            }
        }

        if self.converter.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "converter.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !self.storage.database_url.starts_with("sqlite:") {
            return Err(AppError::Config(format!(
                "storage.database_url must be a sqlite URL, got {:?}",
                self.storage.database_url
            )));
        }

        if self.storage.download_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "storage.download_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn converter_config(&self) -> ConverterConfig {
        ConverterConfig {
            audio_endpoint: self.converter.audio_endpoint.clone(),
            video_endpoint: self.converter.video_endpoint.clone(),
            request_timeout: Duration::from_secs(self.converter.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.converter.connect_timeout_secs),
            user_agent: self.converter.user_agent.clone(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PUFF")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_converter() -> ConverterSettings {
    ConverterSettings {
        audio_endpoint: default_audio_endpoint(),
        video_endpoint: default_video_endpoint(),
        request_timeout_secs: default_request_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
        user_agent: default_user_agent(),
    }
}

fn default_audio_endpoint() -> String {
    ConverterConfig::default().audio_endpoint
}

fn default_video_endpoint() -> String {
    ConverterConfig::default().video_endpoint
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("Puff/{}", env!("CARGO_PKG_VERSION"))
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        download_dir: default_download_dir(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/puff.db".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./data/music")
}

fn default_download() -> DownloadSettings {
    DownloadSettings {
        default_quality: QualityTier::default(),
    }
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "puff=info,puff_cli=info,puff_downloader=info,puff_storage=info".to_string()
}

impl Default for PuffConfig {
    fn default() -> Self {
        Self {
            converter: default_converter(),
            storage: default_storage(),
            download: default_download(),
            logging: default_logging(),
        }
    }
}
