//! # Configuration Settings
//!
//! Defines the configuration structure for vault-proxy.

use crate::errors::{Error, Result};
use crate::secrets::VaultConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Secret backend configuration
    #[validate(nested)]
    pub vault: VaultConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(|e| Error::config(e.to_string()))?;
        self.validate_custom()
    }

    fn validate_custom(&self) -> Result<()> {
        self.vault.check()?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind_address: String,

    /// Server port
    #[validate(range(min = 1, max = 65535, message = "Port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 8210 }
    }
}

impl ServerConfig {
    /// Listen address in `host:port` form
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_address = std::env::var("VAULT_PROXY_BIND_ADDRESS")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.bind_address);

        let port = match std::env::var("VAULT_PROXY_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::config(format!("Invalid VAULT_PROXY_PORT '{}': {}", raw, e)))?,
            Err(_) => defaults.port,
        };

        Ok(Self { bind_address, port })
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::config(format!(
                "Invalid log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Default log level, used when `RUST_LOG` is unset
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), log_format: LogFormat::Text }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let log_level = std::env::var("VAULT_PROXY_LOG_LEVEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.log_level);

        let log_format = match std::env::var("VAULT_PROXY_LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.log_format,
        };

        Ok(Self { log_level, log_format })
    }
}
