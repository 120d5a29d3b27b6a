//! CLI command definitions and dispatch.

pub mod link;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod user;

use anyhow::Context;
use clap::{Parser, Subcommand};

use linkhub_core::config::AppConfig;
use linkhub_database::DatabasePool;

use crate::output::OutputFormat;

/// LinkHub: short link keys for invitations, appointments, forms and cards
#[derive(Debug, Parser)]
#[command(name = "linkhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(short, long, env = "LINKHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the LinkHub server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Ensure the link type lookup rows exist
    Seed,
    /// Account management
    User(user::UserArgs),
    /// Link inspection
    Link(link::LinkArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        linkhub_api::telemetry::init_logging(&config.logging);

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Seed => seed::execute(&config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Link(args) => link::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> anyhow::Result<AppConfig> {
        AppConfig::load(&self.env)
            .with_context(|| format!("Failed to load configuration for '{}'", self.env))
    }
}

/// Helper: open the database pool from config
pub async fn connect(config: &AppConfig) -> anyhow::Result<DatabasePool> {
    DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to the database")
}
