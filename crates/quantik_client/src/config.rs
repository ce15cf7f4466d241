//! Client configuration loaded from TOML.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the configured server URL.
pub const SERVER_URL_ENV: &str = "QUANTIK_SERVER_URL";

/// Smallest analysis depth the client will request.
pub const MIN_ANALYSIS_DEPTH: u32 = 1;

/// Largest analysis depth the client will request.
pub const MAX_ANALYSIS_DEPTH: u32 = 16;

/// Configuration for the Quantik client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the engine.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Search depth sent with analysis requests.
    #[serde(default = "default_analysis_depth")]
    analysis_depth: u32,

    /// Optional per-request timeout. A timed out request surfaces as a
    /// transport fault.
    #[serde(default)]
    request_timeout_secs: Option<u64>,

    /// File receiving the client's logs.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Number of cells per board side, used for rendering.
    #[serde(default = "default_board_size")]
    board_size: u32,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000/".to_string()
}

fn default_analysis_depth() -> u32 {
    3
}

fn default_log_file() -> PathBuf {
    PathBuf::from("quantik_client.log")
}

fn default_board_size() -> u32 {
    4
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            analysis_depth: default_analysis_depth(),
            request_timeout_secs: None,
            log_file: default_log_file(),
            board_size: default_board_size(),
        }
    }
}

impl ClientConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    ///
    /// [`SERVER_URL_ENV`] overrides the file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("No config file, using defaults");
            Self::default()
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            debug!(server_url = %url, "Server URL overridden from environment");
            config.server_url = url;
        }

        Ok(config)
    }

    /// Returns a copy pointing at another server.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Per-request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_ANALYSIS_DEPTH..=MAX_ANALYSIS_DEPTH).contains(&self.analysis_depth) {
            return Err(ConfigError::new(format!(
                "analysis_depth must be between {} and {}, got {}",
                MIN_ANALYSIS_DEPTH, MAX_ANALYSIS_DEPTH, self.analysis_depth
            )));
        }
        if self.board_size == 0 {
            return Err(ConfigError::new("board_size must be positive"));
        }
        Ok(())
    }
}
