//! Database migration command.

use anyhow::Context;

use linkhub_core::config::AppConfig;
use linkhub_database::migration::{latest_version, run_migrations};

use crate::output;

/// Run all pending migrations
pub async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let db = super::connect(config).await?;
    run_migrations(db.pool())
        .await
        .context("Migration failed")?;
    match latest_version() {
        Some(version) => output::print_success(&format!("Schema at version {version}.")),
        None => output::print_success("No migrations embedded."),
    }
    Ok(())
}
