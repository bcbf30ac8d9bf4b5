//! Integration tests for configuration loading from the environment.

use std::env;
use std::sync::Mutex;

use vault_proxy::{config::LogFormat, AppConfig, Error};

// Serializes tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const VARS: &[&str] = &[
    "VAULT_ADDR",
    "VAULT_TOKEN",
    "VAULT_NAMESPACE",
    "VAULT_PATHPREFIX",
    "VAULT_PATHNAME",
    "VAULT_TIMEOUT",
    "VAULT_PROXY_BIND_ADDRESS",
    "VAULT_PROXY_PORT",
    "VAULT_PROXY_LOG_LEVEL",
    "VAULT_PROXY_LOG_FORMAT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_defaults_without_environment() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.vault.address, "http://127.0.0.1:8200");
    assert!(config.vault.token.is_none());
    assert_eq!(config.vault.effective_prefix(), "kv");
    assert_eq!(config.vault.timeout_seconds, 5);
    assert_eq!(config.server.listen_address(), "0.0.0.0:8210");
    assert_eq!(config.observability.log_level, "info");
    assert_eq!(config.observability.log_format, LogFormat::Text);
}

#[test]
fn test_environment_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    env::set_var("VAULT_ADDR", "https://vault.example.com:8200");
    env::set_var("VAULT_TOKEN", "s.from-env");
    env::set_var("VAULT_NAMESPACE", "team-a");
    env::set_var("VAULT_PATHPREFIX", "secret");
    env::set_var("VAULT_PATHNAME", "nuts-node");
    env::set_var("VAULT_TIMEOUT", "10");
    env::set_var("VAULT_PROXY_BIND_ADDRESS", "127.0.0.1");
    env::set_var("VAULT_PROXY_PORT", "9000");
    env::set_var("VAULT_PROXY_LOG_FORMAT", "json");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.vault.address, "https://vault.example.com:8200");
    assert_eq!(config.vault.token.as_ref().map(|t| t.expose_secret()), Some("s.from-env"));
    assert_eq!(config.vault.namespace.as_deref(), Some("team-a"));
    assert_eq!(config.vault.effective_prefix(), "secret/nuts-node");
    assert_eq!(config.vault.timeout_seconds, 10);
    assert_eq!(config.server.listen_address(), "127.0.0.1:9000");
    assert_eq!(config.observability.log_format, LogFormat::Json);

    clear_env();
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    clear_env();
    env::set_var("VAULT_TIMEOUT", "soon");
    assert!(AppConfig::from_env().is_err());

    clear_env();
    env::set_var("VAULT_TIMEOUT", "0");
    assert!(AppConfig::from_env().is_err());

    clear_env();
    env::set_var("VAULT_PROXY_PORT", "http");
    assert!(matches!(AppConfig::from_env(), Err(Error::Config(_))));

    clear_env();
    env::set_var("VAULT_PROXY_LOG_FORMAT", "xml");
    assert!(matches!(AppConfig::from_env(), Err(Error::Config(_))));

    clear_env();
    env::set_var("VAULT_PATHNAME", "../sys");
    assert!(AppConfig::from_env().is_err());

    clear_env();
}
