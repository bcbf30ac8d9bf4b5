//! # Configuration Management
//!
//! Configuration is read from the environment once at startup (a `.env` file
//! is loaded first by the binary) and validated before anything connects.

pub mod settings;

pub use settings::{AppConfig, LogFormat, ObservabilityConfig, ServerConfig};

use crate::errors::Result;
use crate::secrets::VaultConfig;

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerConfig::from_env()?,
            vault: VaultConfig::from_env()?,
            observability: ObservabilityConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }
}
