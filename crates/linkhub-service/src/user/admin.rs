//! Account administration.

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use linkhub_auth::password::{PasswordHasher, PasswordPolicy};
use linkhub_core::config::AuthConfig;
use linkhub_core::result::AppResult;
use linkhub_core::types::{ListQuery, PageResponse, UserId};
use linkhub_database::DatabasePool;
use linkhub_database::repositories::UserRepository;
use linkhub_core::error::AppError;
use linkhub_entity::user::{CreateUser, User, UserStatus};
use linkhub_entity::validation::{not_blank, validate};

use crate::context::RequestContext;

/// A new account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50), custom(function = "not_blank"))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub password: String,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    /// Grant system administrator rights.
    #[serde(default)]
    pub is_system: bool,
}

/// Creates and lists accounts.
#[derive(Debug, Clone)]
pub struct UserAdminService {
    db: DatabasePool,
    users: UserRepository,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
}

impl UserAdminService {
    /// Creates a new user admin service.
    pub fn new(db: DatabasePool, config: &AuthConfig) -> Self {
        Self {
            db,
            users: UserRepository::new(),
            hasher: PasswordHasher::new(),
            policy: PasswordPolicy::new(config),
        }
    }

    /// Create an account. System admin only.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> AppResult<User> {
        ctx.require_admin()?;
        self.create(Some(ctx.user_id), req).await
    }

    /// Create an account without an acting user, for command-line bootstrap.
    pub async fn bootstrap_user(&self, req: CreateUserRequest) -> AppResult<User> {
        self.create(None, req).await
    }

    /// List accounts. System admin only.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> AppResult<PageResponse<User>> {
        ctx.require_admin()?;
        let mut conn = self.db.acquire().await?;
        self.users.list(&mut *conn, query).await
    }

    /// Activate or deactivate an account. System admin only.
    ///
    /// Admins cannot deactivate themselves.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id: UserId,
        status: UserStatus,
    ) -> AppResult<User> {
        ctx.require_admin()?;
        if id == ctx.user_id && !status.can_login() {
            return Err(AppError::validation("You cannot deactivate your own account"));
        }

        let mut conn = self.db.acquire().await?;
        let user = self
            .users
            .update_status(&mut *conn, id, status, ctx.user_id)
            .await?;

        warn!(user_id = %id, status = %status, actor = %ctx.user_id, "User status changed");
        Ok(user)
    }

    /// Count live accounts. System admin only.
    pub async fn count_users(&self, ctx: &RequestContext) -> AppResult<u64> {
        ctx.require_admin()?;
        let mut conn = self.db.acquire().await?;
        self.users.count(&mut *conn).await
    }

    async fn create(&self, actor: Option<UserId>, req: CreateUserRequest) -> AppResult<User> {
        validate(&req)?;
        self.policy.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let mut conn = self.db.acquire().await?;
        let user = self
            .users
            .create(
                &mut *conn,
                &CreateUser {
                    username: req.username.trim().to_string(),
                    email: req.email.filter(|e| !e.trim().is_empty()),
                    password_hash,
                    display_name: req.display_name,
                    is_system: req.is_system,
                    created_by: actor,
                },
            )
            .await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            is_system = user.is_system,
            "User created"
        );
        Ok(user)
    }
}
