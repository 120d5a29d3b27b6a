//! Login and token authentication.

use serde::Serialize;
use tracing::{info, warn};

use linkhub_auth::jwt::{AccessToken, JwtDecoder, JwtEncoder};
use linkhub_auth::password::PasswordHasher;
use linkhub_core::config::AuthConfig;
use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_database::DatabasePool;
use linkhub_database::repositories::UserRepository;
use linkhub_entity::user::User;

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    #[serde(flatten)]
    pub token: AccessToken,
    pub user: User,
}

/// Verifies credentials and bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    db: DatabasePool,
    users: UserRepository,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(db: DatabasePool, config: &AuthConfig) -> Self {
        Self {
            db,
            users: UserRepository::new(),
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Exchange a username and password for an access token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let invalid = || AppError::authentication("Invalid username or password");

        let mut conn = self.db.acquire().await?;
        let user = self
            .users
            .find_by_username(&mut *conn, username.trim())
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Login for unknown user");
                invalid()
            })?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(invalid());
        }
        if !user.can_login() {
            warn!(user_id = %user.id, status = %user.status.as_str(), "Login for inactive user");
            return Err(AppError::authentication("Account is not active"));
        }

        self.users.update_last_login(&mut *conn, user.id).await?;
        let token = self.encoder.issue_access_token(&user)?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginResult { token, user })
    }

    /// Validate a bearer token and reload its user.
    ///
    /// The user row is read on every call so a deactivated account or a
    /// revoked admin flag takes effect immediately.
    pub async fn authenticate(&self, token: &str) -> AppResult<RequestContext> {
        let claims = self.decoder.decode_access_token(token)?;

        let mut conn = self.db.acquire().await?;
        let user = self
            .users
            .find_by_id(&mut *conn, claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        if !user.can_login() {
            return Err(AppError::authentication("Account is not active"));
        }

        Ok(RequestContext::for_user(&user))
    }

    /// The acting user's account.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        let mut conn = self.db.acquire().await?;
        self.users
            .find_by_id(&mut *conn, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
