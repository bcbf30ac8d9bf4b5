//! In-memory backend.
//!
//! Implements [`BackendClient`] over a process-local map so the secret store
//! and the HTTP layer can be exercised without a running Vault. A backend
//! built with [`InMemoryBackend::failing`] rejects every call, which stands in
//! for an unreachable or unauthorized server.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::backend::{BackendClient, SecretData};
use super::error::{Result, SecretsError};

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: RwLock<BTreeMap<String, SecretData>>,
    failure: Option<String>,
    writes: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every operation fails with a backend error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { failure: Some(message.into()), ..Self::default() }
    }

    /// Seed a raw record, bypassing the write counter.
    pub async fn insert(&self, path: impl Into<String>, data: SecretData) {
        self.records.write().await.insert(path.into(), data);
    }

    /// Raw record currently stored at `path`.
    pub async fn record(&self, path: &str) -> Option<SecretData> {
        self.records.read().await.get(path).cloned()
    }

    /// Number of writes performed through [`BackendClient::write`].
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(SecretsError::backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BackendClient for InMemoryBackend {
    async fn read(&self, path: &str) -> Result<Option<SecretData>> {
        self.check()?;
        Ok(self.records.read().await.get(path).cloned())
    }

    async fn write(&self, path: &str, data: SecretData) -> Result<()> {
        self.check()?;
        self.records.write().await.insert(path.to_string(), data);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list(&self, path: &str) -> Result<Option<SecretData>> {
        self.check()?;
        let folder = format!("{}/", path.trim_end_matches('/'));
        let records = self.records.read().await;

        // direct children only; deeper records surface as "child/" like Vault folders
        let mut keys: Vec<String> = Vec::new();
        for stored in records.keys() {
            let Some(rest) = stored.strip_prefix(&folder) else {
                continue;
            };
            let entry = match rest.split_once('/') {
                Some((child, _)) => format!("{}/", child),
                None => rest.to_string(),
            };
            if !entry.is_empty() && !keys.contains(&entry) {
                keys.push(entry);
            }
        }

        let keys: Vec<Value> = keys.into_iter().map(Value::String).collect();
        let mut data = SecretData::new();
        data.insert("keys".to_string(), json!(keys));
        Ok(Some(data))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.check()?;
        self.records.write().await.remove(path);
        Ok(())
    }
}
