//! Backend capability trait.
//!
//! The secret store only needs four raw operations from the backend. Keeping
//! them behind a trait lets the store run against Vault in production and
//! against [`InMemoryBackend`](super::memory::InMemoryBackend) in tests.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::Result;

/// Raw record data as returned by the backend.
pub type SecretData = Map<String, Value>;

/// Remote key-value capability the secret store is built on.
///
/// Implementations must be cheap to share: a single instance is held behind
/// an `Arc` and called concurrently from every request task.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Read the record stored at `path`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing is stored at the path, or when the backend
    /// answers without a data object.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Backend`](super::SecretsError::Backend) on transport,
    ///   authentication or unexpected-response failures
    async fn read(&self, path: &str) -> Result<Option<SecretData>>;

    /// Write `data` as the record at `path`, replacing any existing record.
    async fn write(&self, path: &str, data: SecretData) -> Result<()>;

    /// List the entries directly below `path`.
    ///
    /// # Returns
    ///
    /// The response data (with a `"keys"` array on success), or `Ok(None)`
    /// when the backend returned nothing for the path.
    async fn list(&self, path: &str) -> Result<Option<SecretData>>;

    /// Delete the record at `path`.
    ///
    /// Backends are not required to report whether anything was deleted.
    async fn delete(&self, path: &str) -> Result<()>;
}
