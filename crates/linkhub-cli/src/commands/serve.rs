//! Start the LinkHub server.

use anyhow::Context;
use clap::Args;
use tracing::info;

use linkhub_core::config::AppConfig;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Run database migrations on startup
    #[arg(long)]
    pub migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.migrate {
        config.database.migrate_on_start = true;
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        migrate = config.database.migrate_on_start,
        "Starting server from CLI"
    );
    let db = super::connect(&config).await?;
    linkhub_api::run_server(config, db)
        .await
        .context("Server stopped with an error")
}
