//! # Structured Logging
//!
//! Subscriber setup and logging helpers built on the tracing ecosystem.
//! `RUST_LOG` takes precedence over the configured log level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat, ObservabilityConfig};
use crate::errors::{Error, Result};

/// Create a tracing span for request tracking.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/secrets");
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($method:expr, $path:expr, request_id = $id:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %$id
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// # Errors
///
/// - [`Error::Config`] if the log level is not a valid filter directive
/// - [`Error::Internal`] if a global subscriber is already installed
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false),
            )
            .try_init(),
    };

    result.map_err(|e| Error::internal(format!("Failed to install log subscriber: {}", e)))
}

fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Log configuration at startup
pub fn log_config_info(config: &AppConfig) {
    tracing::info!(
        listen_address = %config.server.listen_address(),
        vault_address = %config.vault.address,
        path_prefix = %config.vault.effective_prefix(),
        namespace = ?config.vault.namespace,
        token_configured = config.vault.token.is_some(),
        timeout_seconds = config.vault.timeout_seconds,
        "vault-proxy configuration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_span_compiles() {
        let _span = request_span!("GET", "/secrets");
        let _span = request_span!("POST", "/secrets/abc", status = 200u16);
        let _span = request_span!("DELETE", "/secrets/abc", request_id = "req-1");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = ObservabilityConfig { log_level: "vault_proxy=loud".to_string(), ..Default::default() };
        assert!(matches!(build_filter(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_log_config_info_does_not_panic() {
        log_config_info(&AppConfig::default());
    }
}
