//! HashiCorp Vault backend implementation.
//!
//! Talks to Vault's logical HTTP API (`/v1/{path}`), which is what the KV
//! version 1 secrets engine exposes. Records are plain JSON objects; the
//! secret store decides which field carries the payload.
//!
//! # Configuration
//!
//! - `VAULT_ADDR`: Vault server address (default `http://127.0.0.1:8200`)
//! - `VAULT_TOKEN`: token sent as `X-Vault-Token`
//! - `VAULT_NAMESPACE`: optional Enterprise namespace
//! - `VAULT_PATHPREFIX`: path prefix, usually the KV mount (default `kv`)
//! - `VAULT_PATHNAME`: optional sub-path below the prefix
//! - `VAULT_TIMEOUT`: per-call timeout in seconds (default 5)
//!
//! # Example
//!
//! ```rust,ignore
//! use vault_proxy::secrets::{BackendClient, VaultClient, VaultConfig};
//!
//! let client = VaultClient::new(&VaultConfig::from_env()?)?;
//! let record = client.read("kv/my-key").await?;
//! ```
//!
//! # Security
//!
//! - The token is held as a [`SecretString`] and never logged
//! - Requests are never retried; a failed or timed out call surfaces as
//!   [`SecretsError::Backend`]

use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

use super::backend::{BackendClient, SecretData};
use super::error::{Result, SecretsError};
use super::path;
use super::types::SecretString;

const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8200";
const DEFAULT_PATH_PREFIX: &str = "kv";
const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Configuration for the Vault backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VaultConfig {
    /// Vault server address (e.g., "https://vault.example.com:8200")
    #[validate(length(min = 1, message = "Vault address cannot be empty"))]
    pub address: String,

    /// Vault token (sent as `X-Vault-Token`)
    pub token: Option<SecretString>,

    /// Vault namespace (for Enterprise multi-tenancy)
    pub namespace: Option<String>,

    /// Root under which every secret path lives (default: "kv")
    #[serde(default = "default_path_prefix")]
    #[validate(length(min = 1, message = "Vault path prefix cannot be empty"))]
    pub path_prefix: String,

    /// Optional sub-path appended to the prefix
    pub path_name: Option<String>,

    /// Timeout applied to every Vault call, in seconds
    #[validate(range(min = 1, max = 300, message = "Vault timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,
}

fn default_path_prefix() -> String {
    DEFAULT_PATH_PREFIX.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: None,
            namespace: None,
            path_prefix: default_path_prefix(),
            path_name: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl VaultConfig {
    /// Load the Vault configuration from environment variables.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] if `VAULT_TIMEOUT` is not a number or the
    ///   resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let address = non_empty_var("VAULT_ADDR").unwrap_or(defaults.address);
        let token = non_empty_var("VAULT_TOKEN").map(SecretString::new);
        let namespace = non_empty_var("VAULT_NAMESPACE");
        let path_prefix = non_empty_var("VAULT_PATHPREFIX").unwrap_or(defaults.path_prefix);
        let path_name = non_empty_var("VAULT_PATHNAME");
        let timeout_seconds = match non_empty_var("VAULT_TIMEOUT") {
            Some(raw) => raw.parse().map_err(|e| {
                SecretsError::config(format!("Invalid VAULT_TIMEOUT '{}': {}", raw, e))
            })?,
            None => defaults.timeout_seconds,
        };

        let config = Self { address, token, namespace, path_prefix, path_name, timeout_seconds };
        config.check()?;
        Ok(config)
    }

    /// Validate field ranges and the sub-path.
    pub fn check(&self) -> Result<()> {
        Validate::validate(self)
            .map_err(|e| SecretsError::config(format!("Invalid Vault configuration: {}", e)))?;

        if let Some(name) = &self.path_name {
            if name.split('/').any(|segment| segment == "..") {
                return Err(SecretsError::config(format!(
                    "Vault path name '{}' cannot contain '..'",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Prefix with the optional sub-path applied, lexically normalized.
    pub fn effective_prefix(&self) -> String {
        match self.path_name.as_deref().map(|name| name.trim_matches('/')) {
            Some(name) if !name.is_empty() => {
                path::normalize(&format!("{}/{}", self.path_prefix, name))
            }
            _ => path::normalize(&self.path_prefix),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Vault logical API client.
///
/// Holds one `reqwest::Client` for its whole lifetime; it is `Send + Sync` and
/// meant to be shared behind an `Arc`.
pub struct VaultClient {
    http: reqwest::Client,
    address: Url,
    token: Option<SecretString>,
    namespace: Option<String>,
}

impl VaultClient {
    /// Build a client for the configured Vault server.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::Config`] if the address is not an absolute URL or the
    ///   HTTP client cannot be built
    pub fn new(config: &VaultConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(SecretsError::config("Vault address cannot be empty"));
        }

        let address = Url::parse(&config.address).map_err(|e| {
            SecretsError::config(format!("Invalid Vault address '{}': {}", config.address, e))
        })?;
        if address.cannot_be_a_base() {
            return Err(SecretsError::config(format!(
                "Vault address '{}' cannot be used as a base URL",
                config.address
            )));
        }

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SecretsError::config(format!("Failed to build Vault HTTP client: {}", e)))?;

        tracing::info!(address = %address, "Proxying to Vault");

        Ok(Self {
            http,
            address,
            token: config.token.clone(),
            namespace: config.namespace.clone(),
        })
    }

    // Each path segment is percent-encoded on its own, so an escaped key such
    // as "abc%23def" reaches Vault as that literal name.
    fn url(&self, path: &str) -> Result<Url> {
        let mut url = self.address.clone();
        url.path_segments_mut()
            .map_err(|_| SecretsError::config("Vault address cannot be used as a base URL"))?
            .pop_if_empty()
            .push("v1")
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<(&str, &str)>,
        body: Option<&SecretData>,
    ) -> Result<Response> {
        let mut url = self.url(path)?;
        if let Some((name, value)) = query {
            url.query_pairs_mut().append_pair(name, value);
        }

        tracing::debug!(method = %method, path = %path, "Calling Vault");

        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = &self.token {
            request = request.header("X-Vault-Token", token.expose_secret());
        }
        if let Some(namespace) = &self.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                SecretsError::backend(format!("{} {} timed out: {}", method, path, e))
            } else {
                SecretsError::backend(format!("{} {} failed: {}", method, path, e))
            }
        })
    }

    async fn read_data(response: Response, method: &str, path: &str) -> Result<Option<SecretData>> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(unexpected_status(response, method, path).await);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body: VaultResponse = response.json().await.map_err(|e| {
            SecretsError::backend(format!("Invalid Vault response for {} {}: {}", method, path, e))
        })?;
        Ok(body.data)
    }

    async fn expect_success(response: Response, method: &str, path: &str) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(unexpected_status(response, method, path).await)
        }
    }
}

async fn unexpected_status(response: Response, method: &str, path: &str) -> SecretsError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let errors = serde_json::from_str::<VaultErrors>(&body)
        .map(|parsed| parsed.errors.join("; "))
        .unwrap_or(body);

    tracing::warn!(status = %status, method = %method, path = %path, "Vault returned an error status");
    SecretsError::backend(format!("Vault returned {} for {} {}: {}", status, method, path, errors))
}

#[derive(Deserialize)]
struct VaultResponse {
    #[serde(default)]
    data: Option<SecretData>,
}

#[derive(Deserialize)]
struct VaultErrors {
    #[serde(default)]
    errors: Vec<String>,
}

#[async_trait]
impl BackendClient for VaultClient {
    async fn read(&self, path: &str) -> Result<Option<SecretData>> {
        let response = self.send(Method::GET, path, None, None).await?;
        Self::read_data(response, "GET", path).await
    }

    async fn write(&self, path: &str, data: SecretData) -> Result<()> {
        let response = self.send(Method::PUT, path, None, Some(&data)).await?;
        Self::expect_success(response, "PUT", path).await
    }

    async fn list(&self, path: &str) -> Result<Option<SecretData>> {
        let response = self.send(Method::GET, path, Some(("list", "true")), None).await?;
        Self::read_data(response, "LIST", path).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(Method::DELETE, path, None, None).await?;
        Self::expect_success(response, "DELETE", path).await
    }
}
