//! LinkHub server
//!
//! Main entry point: loads configuration, initialises logging, connects to
//! the database and serves the HTTP API until interrupted.

use linkhub_core::config::AppConfig;
use linkhub_core::error::AppError;
use linkhub_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("LINKHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    linkhub_api::telemetry::init_logging(&config.logging);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LinkHub v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    linkhub_api::run_server(config, db).await
}
