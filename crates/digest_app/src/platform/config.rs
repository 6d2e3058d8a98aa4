//! Application configuration, read from an optional RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use digest_core::RenderMode;
use digest_engine::ClientSettings;
use digest_logging::digest_info;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILENAME: &str = "vibe_digest.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderSetting {
    #[default]
    Structured,
    Plain,
}

impl From<RenderSetting> for RenderMode {
    fn from(setting: RenderSetting) -> Self {
        match setting {
            RenderSetting::Structured => RenderMode::Structured,
            RenderSetting::Plain => RenderMode::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub render_mode: RenderSetting,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: client.server_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map(|timeout| timeout.as_secs()),
            max_response_bytes: client.max_response_bytes,
            render_mode: RenderSetting::default(),
            log_level: "info".to_string(),
            log_file: PathBuf::from("vibe_digest.log"),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            server_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }

    /// Command-line flags (and their environment fallbacks) win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(server) = &cli.server {
            self.server_url = server.clone();
        }
        if cli.plain {
            self.render_mode = RenderSetting::Plain;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|err| ConfigError::Serialize(err.to_string()))
    }
}

/// Loads `explicit` if given, else `./vibe_digest.ron` if it exists, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                read_config(&path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    digest_info!("Loaded config from {:?}", path);
    Ok(config)
}
