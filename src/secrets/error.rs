//! Error types for secret store operations.

use thiserror::Error;

/// Result type for secrets operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur during secret store operations.
///
/// `NotFound` and `AlreadyExists` are expected outcomes of routine control
/// flow. `Decode` and `Backend` are failures and carry the full detail for
/// server-side logging only.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// No secret exists under the key.
    #[error("key not found: {key}")]
    NotFound { key: String },

    /// A record already exists under the key.
    #[error("key already exists: {key}")]
    AlreadyExists { key: String },

    /// The stored record exists but its payload could not be decoded.
    #[error("unable to decode secret: {message}")]
    Decode { message: String },

    /// Transport, authentication or unexpected-response failure of the backend.
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Invalid backend configuration detected while constructing a client.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl SecretsError {
    /// Create a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an already exists error.
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend { message: message.into() }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = SecretsError::not_found("did:example:123");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "key not found: did:example:123");

        let err = SecretsError::already_exists("abc");
        assert!(err.is_already_exists());
        assert_eq!(err.to_string(), "key already exists: abc");

        let err = SecretsError::backend("connection refused");
        assert!(err.is_backend());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_is_distinct_from_absence() {
        let err = SecretsError::decode("invalid base64");
        assert!(err.is_decode());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("invalid base64"));
    }
}
