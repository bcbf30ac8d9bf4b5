//! Secret store over a key-value backend.
//!
//! [`KvSecretStore`] is the only place where keys turn into storage paths and
//! payloads turn into backend records. Every record holds a single field,
//! [`KEY_FIELD`], containing the base64-encoded secret.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{field, instrument, Span};

use super::backend::{BackendClient, SecretData};
use super::codec;
use super::error::{Result, SecretsError};
use super::path;
use super::vault::{VaultClient, VaultConfig};

/// Field of a backend record that carries the encoded payload.
pub const KEY_FIELD: &str = "key";

/// Introspection path used as the liveness probe. The default Vault token
/// policy allows every token to read it.
pub const TOKEN_LOOKUP_PATH: &str = "auth/token/lookup-self";

/// Storage operations exposed to the HTTP layer.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Check that the backend is reachable and accepts the configured credential.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Backend`] on transport failure or when the backend
    ///   answers the token lookup with nothing
    async fn ping(&self) -> Result<()>;

    /// Retrieve the secret stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`] if no record exists or it lacks the payload field
    /// - [`SecretsError::Decode`] if the payload is not a base64 string
    /// - [`SecretsError::Backend`] on backend failure
    async fn get_secret(&self, key: &str) -> Result<Vec<u8>>;

    /// Store `value` under `key` if nothing is stored there yet.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::AlreadyExists`] if any record exists at the path,
    ///   decodable or not; nothing is written
    /// - [`SecretsError::Backend`] on backend failure
    async fn store_secret(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete the secret stored under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`SecretStore::get_secret`], which is called first, plus
    /// [`SecretsError::Backend`] if the delete itself fails.
    async fn delete_secret(&self, key: &str) -> Result<()>;

    /// Keys stored under the prefix, in backend order.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Backend`] on backend failure or an absent list response
    async fn list_keys(&self) -> Result<Vec<String>>;
}

/// [`SecretStore`] backed by a KV version 1 style backend.
///
/// `store_secret` is check-then-write: two concurrent stores of the same key
/// can both see it absent and both write, in which case the backend keeps the
/// last write. The same applies to `delete_secret`.
#[derive(Clone)]
pub struct KvSecretStore {
    backend: Arc<dyn BackendClient>,
    prefix: String,
}

impl std::fmt::Debug for KvSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvSecretStore").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}

impl KvSecretStore {
    pub fn new(backend: Arc<dyn BackendClient>, prefix: impl Into<String>) -> Self {
        Self { backend, prefix: prefix.into() }
    }

    /// Build a store on a [`VaultClient`] and check connectivity.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] for an unusable configuration
    /// - [`SecretsError::Backend`] if the initial ping fails
    pub async fn connect(config: &VaultConfig) -> Result<Self> {
        config.check()?;
        let client = VaultClient::new(config)?;
        let store = Self::new(Arc::new(client), config.effective_prefix());
        store.ping().await?;
        Ok(store)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Storage path of `key` under this store's prefix.
    pub fn path_for(&self, key: &str) -> String {
        path::storage_path(&self.prefix, key)
    }

    // Payload field of the record at `path`; a missing record and a missing
    // field are both absence.
    async fn read_payload(&self, key: &str, path: &str) -> Result<String> {
        let record = self.backend.read(path).await?.ok_or_else(|| SecretsError::not_found(key))?;

        match record.get(KEY_FIELD) {
            None | Some(Value::Null) => Err(SecretsError::not_found(key)),
            Some(Value::String(payload)) => Ok(payload.clone()),
            Some(_) => Err(SecretsError::decode("unable to convert key result to string")),
        }
    }
}

#[async_trait]
impl SecretStore for KvSecretStore {
    async fn ping(&self) -> Result<()> {
        let response = self.backend.read(TOKEN_LOOKUP_PATH).await.map_err(|e| {
            let cause = match e {
                SecretsError::Backend { message } => message,
                other => other.to_string(),
            };
            SecretsError::backend(format!(
                "unable to connect to Vault: unable to retrieve token status: {}",
                cause
            ))
        })?;

        match response {
            Some(data) if !data.is_empty() => {
                tracing::debug!("Connected to Vault");
                Ok(())
            }
            _ => Err(SecretsError::backend(format!(
                "could not read token information on {}",
                TOKEN_LOOKUP_PATH
            ))),
        }
    }

    #[instrument(skip_all, fields(path = field::Empty))]
    async fn get_secret(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        Span::current().record("path", path.as_str());

        let payload = self.read_payload(key, &path).await?;
        codec::decode(&payload)
    }

    #[instrument(skip_all, fields(path = field::Empty))]
    async fn store_secret(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        Span::current().record("path", path.as_str());

        // Any record counts, with or without a usable payload field.
        if self.backend.read(&path).await?.is_some() {
            tracing::debug!("Refusing to overwrite existing record");
            return Err(SecretsError::already_exists(key));
        }

        let mut record = SecretData::new();
        record.insert(KEY_FIELD.to_string(), Value::String(codec::encode(value)));
        self.backend.write(&path, record).await?;

        tracing::debug!("Stored secret");
        Ok(())
    }

    #[instrument(skip_all, fields(path = field::Empty))]
    async fn delete_secret(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        Span::current().record("path", path.as_str());

        self.get_secret(key).await?;
        self.backend.delete(&path).await?;

        tracing::debug!("Deleted secret");
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let path = path::list_path(&self.prefix);
        let Some(data) = self.backend.list(&path).await? else {
            tracing::warn!(
                path = %path,
                "Vault returned nothing while listing keys, check the path prefix and secrets engine"
            );
            return Err(SecretsError::backend("vault returned nothing while listing keys"));
        };

        let keys = match data.get("keys") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        Ok(keys)
    }
}
