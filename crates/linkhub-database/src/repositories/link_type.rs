//! Link type lookup repository.

use sqlx::PgConnection;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_entity::link::{LinkKind, LinkTypeRecord};

/// Read access to the seeded `link_types` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTypeRepository;

impl LinkTypeRepository {
    /// Create a new link type repository.
    pub fn new() -> Self {
        Self
    }

    /// List every link type.
    pub async fn find_all(&self, conn: &mut PgConnection) -> AppResult<Vec<LinkTypeRecord>> {
        sqlx::query_as::<_, LinkTypeRecord>(
            "SELECT id, name, description FROM link_types ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list link types", e))
    }

    /// Insert any missing kinds. Returns how many rows were added.
    pub async fn ensure_seeded(&self, conn: &mut PgConnection) -> AppResult<u64> {
        let mut added = 0;
        for kind in LinkKind::ALL {
            let result = sqlx::query(
                "INSERT INTO link_types (name, description) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
            )
            .bind(kind.as_str())
            .bind(kind.description())
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to seed link types", e)
            })?;
            added += result.rows_affected();
        }
        Ok(added)
    }
}
