use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use vault_proxy::{cli::Cli, config::AppConfig, observability::init_logging};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists; this must happen before any config is read
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vault-proxy: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("vault-proxy: {}", e);
        return ExitCode::FAILURE;
    }

    match vault_proxy::cli::run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "vault-proxy exited with an error");
            ExitCode::FAILURE
        }
    }
}
