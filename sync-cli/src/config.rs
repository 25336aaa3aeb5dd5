//! Configuration loading for pagesync.
//!
//! Configuration is read from an optional TOML file; every field has a
//! default and command-line flags override what the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sync_client::{HttpConfig, ScrollConfig, StoreConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use sync_core::{END_REACHED_THRESHOLD, SCROLL_TO_TOP_THRESHOLD};

/// Root configuration for pagesync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// REST resource configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Scroll thresholds.
    #[serde(default)]
    pub scroll: ScrollSection,
}

/// REST resource configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root (default: the public character API).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds; 0 disables it (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Scroll thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSection {
    /// Offset beyond which "scroll to top" shows (default: 300).
    #[serde(default = "default_scroll_to_top_threshold")]
    pub scroll_to_top_threshold: f64,
    /// Viewports left below the fold that trigger the next page (default: 0.5).
    #[serde(default = "default_end_reached_threshold")]
    pub end_reached_threshold: f64,
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_scroll_to_top_threshold() -> f64 {
    SCROLL_TO_TOP_THRESHOLD
}

fn default_end_reached_threshold() -> f64 {
    END_REACHED_THRESHOLD
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            scroll_to_top_threshold: default_scroll_to_top_threshold(),
            end_reached_threshold: default_end_reached_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Replace the API root.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        self
    }

    /// Transport configuration.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(&self.api.base_url)
    }

    /// Store configuration.
    pub fn store_config(&self) -> StoreConfig {
        match self.api.timeout_secs {
            0 => StoreConfig::new().without_timeout(),
            secs => StoreConfig::new().with_timeout(Duration::from_secs(secs)),
        }
    }

    /// Scroll controller configuration.
    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            scroll_to_top_threshold: self.scroll.scroll_to_top_threshold,
            end_reached_threshold: self.scroll.end_reached_threshold,
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
