//! QuickDesk server: helpdesk tickets, community Q&A and administration.
//!
//! Main entry point that wires the crates together and starts the server.

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use quickdesk_core::config::{AppConfig, LogFormat, LoggingConfig};
use quickdesk_core::error::AppError;
use quickdesk_database::Store;

#[tokio::main]
async fn main() {
    let env = std::env::var("QUICKDESK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => fmt().json().with_env_filter(filter).with_target(true).init(),
        LogFormat::Pretty => fmt().pretty().with_env_filter(filter).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Starting QuickDesk v{}", env!("CARGO_PKG_VERSION"));

    let store = Store::connect(&config.database).await?;
    quickdesk_api::run_server(config, store).await?;

    info!("QuickDesk shut down");
    Ok(())
}
