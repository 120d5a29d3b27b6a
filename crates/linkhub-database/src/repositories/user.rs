//! User repository implementation.

use sqlx::PgConnection;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::types::{ListQuery, PageResponse, UserId};
use linkhub_entity::user::{CreateUser, User, UserStatus};

const USER_COLUMNS: &str = "id, username, email, password_hash, display_name, is_system, status, \
                            last_login_at, created_at, updated_at";

/// Repository for user accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    /// Create a new user repository.
    pub fn new() -> Self {
        Self
    }

    /// Find a live user by primary key.
    pub async fn find_by_id(&self, conn: &mut PgConnection, id: UserId) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a live user by username (case-insensitive).
    pub async fn find_by_username(
        &self,
        conn: &mut PgConnection,
        username: &str,
    ) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(username) = LOWER($1) AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Whether the given user is a live system administrator.
    pub async fn is_system(&self, conn: &mut PgConnection, id: UserId) -> AppResult<bool> {
        let flag: Option<bool> = sqlx::query_scalar(
            "SELECT is_system FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read user role", e))?;
        Ok(flag.unwrap_or(false))
    }

    /// List live users, optionally filtered by username or email.
    pub async fn list(
        &self,
        conn: &mut PgConnection,
        query: &ListQuery,
    ) -> AppResult<PageResponse<User>> {
        let pattern = query.search_pattern();
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL \
             AND ($1::TEXT IS NULL OR username ILIKE $1 OR email ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL \
             AND ($1::TEXT IS NULL OR username ILIKE $1 OR email ILIKE $1) \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(pattern.as_deref())
            .bind(query.page.sql_limit())
            .bind(query.page.sql_offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            query.page.page,
            query.page.page_size,
            total as u64,
        ))
    }

    /// Count live users.
    pub async fn count(&self, conn: &mut PgConnection) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(total as u64)
    }

    /// Create a new user.
    pub async fn create(&self, conn: &mut PgConnection, data: &CreateUser) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, display_name, is_system, status, \
                                created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(&data.display_name)
            .bind(data.is_system)
            .bind(UserStatus::Active)
            .bind(data.created_by)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Username '{}' already exists", data.username))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
            })
    }

    /// Change a user's status.
    pub async fn update_status(
        &self,
        conn: &mut PgConnection,
        id: UserId,
        status: UserStatus,
        actor: UserId,
    ) -> AppResult<User> {
        let sql = format!(
            "UPDATE users SET status = $2, updated_at = NOW(), updated_by = $3 \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(status)
            .bind(actor)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Update last login timestamp.
    pub async fn update_last_login(&self, conn: &mut PgConnection, id: UserId) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }
}
