//! # Health Checking
//!
//! Liveness of the proxy is the liveness of its secret backend: a health check
//! is a single [`SecretStore::ping`].

use serde::{Deserialize, Serialize};

use crate::secrets::SecretStore;

/// Health status for the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Pass,
    Fail,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Pass)
    }
}

/// Health check result as reported on `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServiceStatus {
    pub fn pass() -> Self {
        Self { status: HealthStatus::Pass, details: None }
    }

    pub fn fail(details: impl Into<String>) -> Self {
        Self { status: HealthStatus::Fail, details: Some(details.into()) }
    }
}

/// Details reported on a failed check. The underlying error is only logged.
pub const BACKEND_UNAVAILABLE: &str = "secret backend unavailable";

/// Ping the backend and report the outcome. Never fails itself.
pub async fn check_backend(store: &dyn SecretStore) -> ServiceStatus {
    match store.ping().await {
        Ok(()) => ServiceStatus::pass(),
        Err(e) => {
            tracing::warn!(error = %e, "Secret backend health check failed");
            ServiceStatus::fail(BACKEND_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{InMemoryBackend, KvSecretStore, SecretData, TOKEN_LOOKUP_PATH};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(ServiceStatus::pass()).unwrap(), json!({"status": "pass"}));
        assert_eq!(
            serde_json::to_value(ServiceStatus::fail("down")).unwrap(),
            json!({"status": "fail", "details": "down"})
        );
    }

    #[tokio::test]
    async fn test_check_backend_pass() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut token = SecretData::new();
        token.insert("id".to_string(), json!("s.token"));
        backend.insert(TOKEN_LOOKUP_PATH, token).await;

        let store = KvSecretStore::new(backend, "kv");
        let status = check_backend(&store).await;
        assert!(status.status.is_healthy());
        assert!(status.details.is_none());
    }

    #[tokio::test]
    async fn test_check_backend_fail_hides_backend_error() {
        let store = KvSecretStore::new(Arc::new(InMemoryBackend::failing("connection refused")), "kv");
        let status = check_backend(&store).await;
        assert_eq!(status.status, HealthStatus::Fail);

        let details = status.details.unwrap_or_default();
        assert_eq!(details, BACKEND_UNAVAILABLE);
        assert!(!details.contains("refused"));
    }
}
