//! # Error Handling
//!
//! Crate-level error type for startup, configuration and server failures.
//! Secret store failures keep their own [`SecretsError`] classification and
//! are wrapped here only when they abort the process.

use crate::secrets::SecretsError;

/// Custom result type for vault-proxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vault-proxy service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network transport errors (listener bind, serve loop)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Secret backend errors
    #[error(transparent)]
    Secrets(#[from] SecretsError),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
