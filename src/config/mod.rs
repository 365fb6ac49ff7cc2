//! Application configuration
//!
//! Service settings loaded from TOML, with every field defaulted so a
//! missing file is never fatal.
//!
//! ## Loading Order
//!
//! 1. `FLOWLINE_CONFIG` environment variable (path to TOML file)
//! 2. `flowline.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The `[cost_defaults]` section pre-fills the cost calculator; API
//! callers may override any of it per request, so nothing here is global
//! mutable state — the loaded config is passed explicitly to the parts
//! that need it.

pub mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::CostConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Dataset source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the performance CSV
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "data/shaker_performance.csv".to_string(),
        }
    }
}

/// Root service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Dataset source
    pub dataset: DatasetConfig,

    /// Default cost calculator knobs, overridable per API request
    pub cost_defaults: CostConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order. Parse failures
    /// fall through to the next source with a warning; a present-but-bad
    /// `cost_defaults` section is a hard error (see `load_from_file`).
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("FLOWLINE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from FLOWLINE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from FLOWLINE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "FLOWLINE_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("flowline.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./flowline.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./flowline.toml, using defaults");
                }
            }
        }

        info!("No flowline.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Two-pass: unknown keys produce warnings with "did you mean?"
    /// suggestions (never fatal, existing configs keep working), then the
    /// parsed `[cost_defaults]` values go through range validation, which
    /// IS fatal — a server that rejects every cost request at runtime
    /// should refuse to start instead.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for w in validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        let errors = validation::validate_cost_defaults(&config.cost_defaults);
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors.join("; ")));
        }

        Ok(config)
    }
}
