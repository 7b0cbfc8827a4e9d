//! API server configuration
//!
//! Layered with the `config` crate, lowest precedence first:
//! 1. Built-in defaults
//! 2. Config file (`climate-api.toml` in the working directory, or `--config`)
//! 3. Environment variables, e.g. `CLIMATE_API__SERVER__BIND=0.0.0.0:5000`

use crate::error::ApiError;
use crate::rate_limit::RateLimitConfig;
use climate_storage::DatabaseConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "climate-api";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CLIMATE_API";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub metrics: MetricsConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (default: "127.0.0.1:5000")
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Prometheus exporter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Serve `/metrics`
    pub enabled: bool,
}

impl ApiConfig {
    /// Load configuration from `path` (or the default file, if present) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
