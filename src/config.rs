//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the citation extractor: the HTTP server,
//! the alias dictionary path, and logging, loaded from a TOML file with
//! environment variable overrides and sensible defaults.
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Command line arguments (highest priority, applied by `main.rs`)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)

use crate::errors::{CitationError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server and API configuration.
    pub server: ServerConfig,
    /// Alias dictionary loading configuration.
    pub alias: AliasConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server and API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Maximum request payload size in MB.
    pub max_payload_size_mb: u32,
    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
    /// Enable CORS.
    pub enable_cors: bool,
}

/// Alias dictionary loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Path to the JSON `law_id -> [alias, ...]` dictionary file.
    pub dict_path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Enable structured JSON logging.
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location (`config.toml`).
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when the file doesn't exist, then applying environment overrides and
    /// validating the result.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if !path.exists() {
            tracing::warn!("configuration file not found: {:?}, using defaults", path);
            Self::default()
        } else {
            let content = std::fs::read_to_string(path).map_err(|e| CitationError::Config {
                message: format!("failed to read config file {path:?}: {e}"),
            })?;
            toml::from_str(&content).map_err(|e| CitationError::Config {
                message: format!("failed to parse config file {path:?}: {e}"),
            })?
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides. `LOG_LEVEL` is kept as a bare
    /// variable name; the rest follow the project's own `LAWCITE_*` naming
    /// convention.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(host) = std::env::var("LAWCITE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("LAWCITE_PORT") {
            self.server.port = port.parse().map_err(|_| CitationError::Config {
                message: "invalid port number in LAWCITE_PORT".to_string(),
            })?;
        }
        if let Ok(dict_path) = std::env::var("LAWCITE_ALIAS_PATH") {
            self.alias.dict_path = PathBuf::from(dict_path);
        }
        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(CitationError::ValidationFailed {
                field: "server.port".to_string(),
                reason: "port cannot be zero".to_string(),
            });
        }
        if self.alias.dict_path.as_os_str().is_empty() {
            return Err(CitationError::ValidationFailed {
                field: "alias.dict_path".to_string(),
                reason: "alias dictionary path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CitationError::Config {
            message: format!("failed to serialize config to TOML: {e}"),
        })
    }

    /// Save the configuration to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8978,
                max_payload_size_mb: 10,
                request_timeout_seconds: 30,
                enable_cors: true,
            },
            alias: AliasConfig {
                dict_path: PathBuf::from("./config/aliases.json"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}
