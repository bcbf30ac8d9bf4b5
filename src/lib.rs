//! # vault-proxy
//!
//! A small REST gateway that stores, retrieves, lists and deletes opaque
//! secret values in HashiCorp Vault.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → SecretStore → path resolution + base64 codec → Vault logical API
//! ```
//!
//! ## Core Components
//!
//! - **REST API**: axum router exposing `/health` and `/secrets`
//! - **Secret store**: existence-checked get/store/delete/list over a backend
//! - **Vault client**: reqwest client for `/v1/{path}` with token and namespace headers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vault_proxy::{api::start_api_server, secrets::KvSecretStore, AppConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let store = KvSecretStore::connect(&config.vault).await?;
//!     start_api_server(&config.server, Arc::new(store)).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "vault-proxy");
    }
}
