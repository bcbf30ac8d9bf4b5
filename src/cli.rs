//! # Command Line Interface
//!
//! `vault-proxy` runs the HTTP server by default; `vault-proxy ping` only
//! checks that Vault is reachable with the configured credential.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::api::start_api_server;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::observability::log_config_info;
use crate::secrets::KvSecretStore;
use crate::{APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "vault-proxy")]
#[command(about = "REST proxy for secrets stored in HashiCorp Vault")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Listen host, overrides VAULT_PROXY_BIND_ADDRESS
        #[arg(long)]
        bind_address: Option<String>,

        /// Listen port, overrides VAULT_PROXY_PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Check connectivity to Vault and exit
    Ping,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve { bind_address: None, port: None })
    }
}

/// Execute the parsed command against a loaded configuration
pub async fn run(cli: Cli, mut config: AppConfig) -> Result<()> {
    match cli.command() {
        Commands::Serve { bind_address, port } => {
            if let Some(bind_address) = bind_address {
                config.server.bind_address = bind_address;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            serve(config).await
        }
        Commands::Ping => ping(&config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    info!(app_name = APP_NAME, version = VERSION, "Starting vault-proxy");
    log_config_info(&config);

    let store = KvSecretStore::connect(&config.vault).await.map_err(|e| {
        error!(error = %e, "Unable to connect to Vault");
        e
    })?;

    start_api_server(&config.server, Arc::new(store)).await
}

async fn ping(config: &AppConfig) -> Result<()> {
    KvSecretStore::connect(&config.vault).await?;
    info!(address = %config.vault.address, "Vault is reachable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["vault-proxy"]);
        assert_eq!(cli.command(), Commands::Serve { bind_address: None, port: None });
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["vault-proxy", "serve", "--bind-address", "127.0.0.1", "--port", "9000"]);
        assert_eq!(
            cli.command(),
            Commands::Serve { bind_address: Some("127.0.0.1".to_string()), port: Some(9000) }
        );
    }

    #[test]
    fn test_ping_subcommand() {
        let cli = Cli::parse_from(["vault-proxy", "ping"]);
        assert_eq!(cli.command(), Commands::Ping);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["vault-proxy", "serve", "--port", "70000"]).is_err());
    }

    #[tokio::test]
    async fn test_ping_fails_without_vault() {
        let mut config = AppConfig::default();
        config.vault.address = "http://127.0.0.1:1".to_string();
        config.vault.timeout_seconds = 1;

        let cli = Cli::parse_from(["vault-proxy", "ping"]);
        assert!(run(cli, config).await.is_err());
    }
}
