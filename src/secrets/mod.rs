//! Secret storage on top of a remote key-value backend.
//!
//! # Architecture
//!
//! The module is layered leaf-first:
//!
//! - [`path`]: turns a caller-supplied key into a storage path that can never
//!   leave the configured prefix
//! - [`codec`]: base64 transport encoding of secret bytes
//! - [`BackendClient`]: the raw read/write/list/delete capability, implemented
//!   by [`VaultClient`] for production and [`InMemoryBackend`] for tests
//! - [`SecretStore`]: get/store/delete/list with existence semantics, and the
//!   connectivity check; [`KvSecretStore`] is the implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use vault_proxy::secrets::{KvSecretStore, SecretStore, VaultConfig};
//!
//! let store = KvSecretStore::connect(&VaultConfig::from_env()?).await?;
//! store.store_secret("did:example:123#abc", b"secret-value").await?;
//! let value = store.get_secret("did:example:123#abc").await?;
//! ```
//!
//! # Security Considerations
//!
//! - Secret values are never logged; keys only appear in escaped path form
//! - The Vault token is a [`SecretString`] and redacts itself
//! - Encryption at rest is left to the backend

pub mod backend;
pub mod codec;
pub mod error;
pub mod memory;
pub mod path;
pub mod store;
pub mod types;
pub mod vault;

pub use backend::{BackendClient, SecretData};
pub use error::{Result, SecretsError};
pub use memory::InMemoryBackend;
pub use store::{KvSecretStore, SecretStore, KEY_FIELD, TOKEN_LOOKUP_PATH};
pub use types::SecretString;
pub use vault::{VaultClient, VaultConfig};
