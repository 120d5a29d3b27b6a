//! Behaviour shared by the four link-addressed resource repositories.
//!
//! Every resource table has the same skeleton (`link_id`, an owner column,
//! `is_enabled`, `password_hash`, audit columns) and differs only in its
//! detail columns. Lookups, locking, soft-delete, listing and counting are
//! provided here; each repository supplies the insert and update SQL.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::types::{LinkId, ListQuery, OrganizationId, PageResponse, UserId};
use linkhub_entity::resource::LinkedResource;

/// Values for inserting a resource row.
#[derive(Debug, Clone, Copy)]
pub struct NewResource<'a, D> {
    /// The link issued for this resource in the same transaction.
    pub link_id: LinkId,
    /// Owning account.
    pub owner: UserId,
    pub organization_id: Option<OrganizationId>,
    pub is_enabled: bool,
    pub detail: &'a D,
    /// Argon2 hash, if the resource is password protected.
    pub password_hash: Option<&'a str>,
    /// Acting user stamped into `created_by` / `updated_by`.
    pub actor: UserId,
}

/// Values for replacing a resource row's editable columns.
#[derive(Debug, Clone, Copy)]
pub struct ResourceChanges<'a, D> {
    pub is_enabled: bool,
    pub detail: &'a D,
    /// Final value of the `password_hash` column.
    pub password_hash: Option<&'a str>,
    pub actor: UserId,
}

/// A repository for one resource table.
#[async_trait]
pub trait ResourceRepository: Send + Sync + 'static {
    /// Row model returned by every query.
    type Record: LinkedResource + Serialize + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;
    /// Editable detail columns.
    type Detail: Send + Sync + 'static;

    /// Table name.
    const TABLE: &'static str;
    /// Column holding the owning user id.
    const OWNER_COLUMN: &'static str;
    /// SQL expression over alias `r` matched by free-text search.
    const SEARCH_EXPR: &'static str;

    /// Insert a row and return it with its link key.
    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewResource<'_, Self::Detail>,
    ) -> AppResult<Self::Record>;

    /// Replace the editable columns of a live row.
    async fn update(
        &self,
        conn: &mut PgConnection,
        id: i64,
        changes: ResourceChanges<'_, Self::Detail>,
    ) -> AppResult<Option<Self::Record>>;

    /// Find a live row by id.
    async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<Self::Record>> {
        let sql = format!(
            "{} WHERE r.id = $1 AND r.deleted_at IS NULL AND l.deleted_at IS NULL",
            select_with_key(Self::TABLE)
        );
        sqlx::query_as::<_, Self::Record>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find row in {}", Self::TABLE),
                    e,
                )
            })
    }

    /// Find a live row by id and lock it until the transaction ends.
    async fn find_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: i64,
    ) -> AppResult<Option<Self::Record>> {
        let sql = format!(
            "{} WHERE r.id = $1 AND r.deleted_at IS NULL AND l.deleted_at IS NULL FOR UPDATE OF r",
            select_with_key(Self::TABLE)
        );
        sqlx::query_as::<_, Self::Record>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to lock row in {}", Self::TABLE),
                    e,
                )
            })
    }

    /// Soft-delete a live row. Returns `false` when nothing was deleted.
    async fn soft_delete(&self, conn: &mut PgConnection, id: i64, actor: UserId) -> AppResult<bool> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NOW(), deleted_by = $2, updated_at = NOW(), updated_by = $2 \
             WHERE id = $1 AND deleted_at IS NULL",
            Self::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(actor)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to delete row in {}", Self::TABLE),
                    e,
                )
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// List live rows, newest first, optionally restricted to one owner.
    async fn list(
        &self,
        conn: &mut PgConnection,
        owner: Option<UserId>,
        query: &ListQuery,
    ) -> AppResult<PageResponse<Self::Record>> {
        let filter = format!(
            "WHERE r.deleted_at IS NULL AND l.deleted_at IS NULL \
             AND ($1::BIGINT IS NULL OR r.{owner_col} = $1) \
             AND ($2::TEXT IS NULL OR {search} ILIKE $2)",
            owner_col = Self::OWNER_COLUMN,
            search = Self::SEARCH_EXPR,
        );
        let pattern = query.search_pattern();

        let count_sql = format!(
            "SELECT COUNT(*) FROM {} r JOIN links l ON l.id = r.link_id {filter}",
            Self::TABLE
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(owner)
            .bind(pattern.as_deref())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to count rows in {}", Self::TABLE),
                    e,
                )
            })?;

        let list_sql = format!(
            "{} {filter} ORDER BY r.created_at DESC, r.id DESC LIMIT $3 OFFSET $4",
            select_with_key(Self::TABLE)
        );
        let items = sqlx::query_as::<_, Self::Record>(&list_sql)
            .bind(owner)
            .bind(pattern.as_deref())
            .bind(query.page.sql_limit())
            .bind(query.page.sql_offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to list rows in {}", Self::TABLE),
                    e,
                )
            })?;

        Ok(PageResponse::new(
            items,
            query.page.page,
            query.page.page_size,
            total as u64,
        ))
    }

    /// Count live rows, optionally restricted to one owner.
    async fn count(&self, conn: &mut PgConnection, owner: Option<UserId>) -> AppResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR {} = $1)",
            Self::TABLE,
            Self::OWNER_COLUMN
        );
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(owner)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to count rows in {}", Self::TABLE),
                    e,
                )
            })?;
        Ok(total as u64)
    }
}

/// `SELECT` of a resource row plus the key of its link, aliased `r` / `l`.
pub(crate) fn select_with_key(table: &str) -> String {
    format!("SELECT r.*, l.key AS link_key FROM {table} r JOIN links l ON l.id = r.link_id")
}

/// Wrap a data-modifying CTE named `changed` so it returns rows with their link key.
pub(crate) fn returning_with_key(cte: &str) -> String {
    format!(
        "WITH changed AS ({cte} RETURNING *) \
         SELECT changed.*, l.key AS link_key FROM changed JOIN links l ON l.id = changed.link_id"
    )
}

/// `INSERT` returning the row with its link key.
///
/// Bind order: every detail column, then `link_id`, owner, `organization_id`,
/// `is_enabled`, `password_hash`, actor.
pub(crate) fn insert_sql(table: &str, owner_column: &str, detail_columns: &[&str]) -> String {
    let n = detail_columns.len();
    let placeholders = (1..=n)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    returning_with_key(&format!(
        "INSERT INTO {table} ({cols}, link_id, {owner_column}, organization_id, is_enabled, \
         password_hash, created_by, updated_by) \
         VALUES ({placeholders}, ${a}, ${b}, ${c}, ${d}, ${e}, ${f}, ${f})",
        cols = detail_columns.join(", "),
        a = n + 1,
        b = n + 2,
        c = n + 3,
        d = n + 4,
        e = n + 5,
        f = n + 6,
    ))
}

/// `UPDATE` of a live row returning it with its link key.
///
/// Bind order: every detail column, then id, `is_enabled`, `password_hash`, actor.
pub(crate) fn update_sql(table: &str, detail_columns: &[&str]) -> String {
    let n = detail_columns.len();
    let assignments = detail_columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    returning_with_key(&format!(
        "UPDATE {table} SET {assignments}, is_enabled = ${b}, password_hash = ${c}, \
         updated_at = NOW(), updated_by = ${d} \
         WHERE id = ${a} AND deleted_at IS NULL",
        a = n + 1,
        b = n + 2,
        c = n + 3,
        d = n + 4,
    ))
}

/// Map an insert/update failure, turning constraint violations into validation errors.
pub(crate) fn write_error(table: &str, action: &str, err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_check_violation() || db.is_foreign_key_violation() => {
            AppError::validation(format!("Rejected by {table} constraints: {}", db.message()))
        }
        _ => AppError::with_source(
            ErrorKind::Database,
            format!("Failed to {action} row in {table}"),
            err,
        ),
    }
}
