//! Embedded schema migrations.
//!
//! The migrations also seed the `link_types` lookup table, so a migrated
//! database can issue links without a separate seed step.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use linkhub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration to `pool`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Schema is up to date");
    Ok(())
}

/// Latest migration version compiled into this binary.
pub fn latest_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}
