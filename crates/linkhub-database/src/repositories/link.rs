//! Link store: persistence for the key → typed target mapping.

use async_trait::async_trait;
use sqlx::PgConnection;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::types::{LinkId, UserId};
use linkhub_entity::link::{Link, NewLink};

/// Raised by the `links_forbid_key_change` trigger.
const KEY_IMMUTABLE_CONSTRAINT: &str = "links_key_immutable";

/// Field updates accepted by [`LinkStore::update_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkChanges {
    /// Requested key. Any value other than the stored key is rejected.
    pub key: Option<String>,
    /// New target id.
    pub target_id: Option<i64>,
}

/// Persistence operations on links, run on a caller-supplied connection.
///
/// `Conn` is the handle every call runs on; for PostgreSQL it is a
/// `PgConnection` borrowed from a pool checkout or an open transaction.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Connection or transaction handle.
    type Conn: Send;

    /// Insert a link. Returns `None` when the key is already taken.
    async fn insert(&self, conn: &mut Self::Conn, link: &NewLink) -> AppResult<Option<Link>>;

    /// Find a live link by id, joined with its type name.
    async fn find_by_id(&self, conn: &mut Self::Conn, id: LinkId) -> AppResult<Option<Link>>;

    /// Find a live link by key, joined with its type name.
    async fn find_by_key(&self, conn: &mut Self::Conn, key: &str) -> AppResult<Option<Link>>;

    /// Whether any link, live or soft-deleted, holds `key`.
    async fn exists_by_key(&self, conn: &mut Self::Conn, key: &str) -> AppResult<bool>;

    /// Apply `changes` to a live link, stamping `actor` as the updater.
    async fn update_fields(
        &self,
        conn: &mut Self::Conn,
        id: LinkId,
        changes: &LinkChanges,
        actor: UserId,
    ) -> AppResult<Option<Link>>;

    /// Soft-delete a live link. Returns `false` when nothing was deleted.
    async fn soft_delete(&self, conn: &mut Self::Conn, id: LinkId, actor: UserId)
    -> AppResult<bool>;
}

const SELECT_LINK: &str = r#"
    SELECT l.id, l.key, l.type_id, t.name AS type_name, l.target_id, l.creator_user_id,
           l.created_at, l.updated_at, l.created_by, l.updated_by
    FROM links l
    JOIN link_types t ON t.id = l.type_id
"#;

/// PostgreSQL implementation of [`LinkStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkRepository;

impl LinkRepository {
    /// Create a new link repository.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LinkStore for LinkRepository {
    type Conn = PgConnection;

    async fn insert(&self, conn: &mut PgConnection, link: &NewLink) -> AppResult<Option<Link>> {
        // ON CONFLICT keeps the surrounding transaction usable when the key
        // is taken, so the caller can retry with a new candidate.
        let result = sqlx::query_as::<_, Link>(
            r#"
            WITH inserted AS (
                INSERT INTO links (key, type_id, creator_user_id, created_by, updated_by)
                VALUES ($1, $2, $3, $3, $3)
                ON CONFLICT (key) DO NOTHING
                RETURNING *
            )
            SELECT i.id, i.key, i.type_id, t.name AS type_name, i.target_id, i.creator_user_id,
                   i.created_at, i.updated_at, i.created_by, i.updated_by
            FROM inserted i
            JOIN link_types t ON t.id = i.type_id
            "#,
        )
        .bind(&link.key)
        .bind(link.type_id)
        .bind(link.creator_user_id)
        .fetch_optional(&mut *conn)
        .await;

        match result {
            Ok(link) => Ok(link),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(AppError::validation(format!(
                    "Unknown link type {} or creator {}",
                    link.type_id, link.creator_user_id
                )))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to insert link",
                e,
            )),
        }
    }

    async fn find_by_id(&self, conn: &mut PgConnection, id: LinkId) -> AppResult<Option<Link>> {
        let sql = format!("{SELECT_LINK} WHERE l.id = $1 AND l.deleted_at IS NULL");
        sqlx::query_as::<_, Link>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link", e))
    }

    async fn find_by_key(&self, conn: &mut PgConnection, key: &str) -> AppResult<Option<Link>> {
        let sql = format!("{SELECT_LINK} WHERE l.key = $1 AND l.deleted_at IS NULL");
        sqlx::query_as::<_, Link>(&sql)
            .bind(key)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find link by key", e)
            })
    }

    async fn exists_by_key(&self, conn: &mut PgConnection, key: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE key = $1")
            .bind(key)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check link key", e)
            })?;
        Ok(count > 0)
    }

    async fn update_fields(
        &self,
        conn: &mut PgConnection,
        id: LinkId,
        changes: &LinkChanges,
        actor: UserId,
    ) -> AppResult<Option<Link>> {
        let result = sqlx::query_as::<_, Link>(
            r#"
            WITH updated AS (
                UPDATE links SET
                    key = COALESCE($2, key),
                    target_id = COALESCE($3, target_id),
                    updated_at = NOW(),
                    updated_by = $4
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING *
            )
            SELECT u.id, u.key, u.type_id, t.name AS type_name, u.target_id, u.creator_user_id,
                   u.created_at, u.updated_at, u.created_by, u.updated_by
            FROM updated u
            JOIN link_types t ON t.id = u.type_id
            "#,
        )
        .bind(id)
        .bind(changes.key.as_deref())
        .bind(changes.target_id)
        .bind(actor)
        .fetch_optional(&mut *conn)
        .await;

        result.map_err(update_error)
    }

    async fn soft_delete(
        &self,
        conn: &mut PgConnection,
        id: LinkId,
        actor: UserId,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET deleted_at = NOW(), deleted_by = $2, updated_at = NOW(), updated_by = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(actor)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn update_error(err: sqlx::Error) -> AppError {
    let rejected = match &err {
        sqlx::Error::Database(db) => constraint_error(db.constraint()),
        _ => None,
    };
    rejected.unwrap_or_else(|| {
        AppError::with_source(ErrorKind::Database, "Failed to update link", err)
    })
}

fn constraint_error(constraint: Option<&str>) -> Option<AppError> {
    (constraint == Some(KEY_IMMUTABLE_CONSTRAINT))
        .then(|| AppError::key_immutable("Link key cannot be changed"))
}
