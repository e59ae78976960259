//! Configuration management for the tool server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::Error;
use super::transport::TransportConfig;
use crate::domains::weather::DEFAULT_FORECAST_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Main configuration structure for the tool server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Weight entry persistence.
    pub storage: StorageConfig,

    /// Weather provider access.
    pub weather: WeatherConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Which weight store backs the `weight_logger` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database file at [`StorageConfig::db_path`].
    Sqlite,
    /// Process-local memory; entries vanish on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(Error::config(format!("unknown weight store backend: {other}"))),
        }
    }
}

/// Weight store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation.
    pub backend: StorageBackend,

    /// Database file for the SQLite backend.
    pub db_path: PathBuf,
}

/// Weather provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint queried for current temperatures.
    pub api_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            db_path: PathBuf::from("weight_tracker.db"),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tracker-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            storage: StorageConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_WEIGHT_DB_PATH`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(backend) = std::env::var("MCP_WEIGHT_STORE") {
            match backend.parse() {
                Ok(backend) => config.storage.backend = backend,
                Err(e) => warn!("{}; falling back to {:?}", e, config.storage.backend),
            }
        }

        if let Ok(db_path) = std::env::var("MCP_WEIGHT_DB_PATH") {
            config.storage.db_path = PathBuf::from(db_path);
        }

        if let Ok(api_url) = std::env::var("MCP_WEATHER_API_URL") {
            info!("Weather provider overridden: {}", api_url);
            config.weather.api_url = api_url;
        }

        if let Ok(timeout) = std::env::var("MCP_WEATHER_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.weather.timeout_secs = secs,
                Err(_) => warn!(
                    "Invalid MCP_WEATHER_TIMEOUT_SECS '{}', keeping {}s",
                    timeout, config.weather.timeout_secs
                ),
            }
        }

        config
    }
}
