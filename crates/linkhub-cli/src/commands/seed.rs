//! Link type seeding.

use anyhow::Context;

use linkhub_core::config::AppConfig;
use linkhub_database::repositories::LinkTypeRepository;

use crate::output;

/// Insert any missing link type rows. Safe to run repeatedly.
pub async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let db = super::connect(config).await?;
    let mut conn = db.acquire().await?;

    let inserted = LinkTypeRepository::new()
        .ensure_seeded(&mut *conn)
        .await
        .context("Failed to seed link types")?;

    output::print_success(&format!("Link types seeded ({inserted} inserted)."));
    Ok(())
}
