//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};

use linkhub_core::error::AppError;
use linkhub_core::types::UserId;
use linkhub_entity::user::User;

/// Context for the current authenticated request.
///
/// Built from a freshly loaded user row and passed into service methods so
/// that every operation knows *who* is acting and stamps them as the audit
/// actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username.
    pub username: String,
    /// Whether the user is a system administrator.
    pub is_system: bool,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, username: impl Into<String>, is_system: bool) -> Self {
        Self {
            user_id,
            username: username.into(),
            is_system,
        }
    }

    /// Builds the context for a loaded user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.username.clone(), user.is_system)
    }

    /// Whether the user may act on something owned by `owner`.
    pub fn can_access(&self, owner: UserId) -> bool {
        self.is_system || self.user_id == owner
    }

    /// Fails with `Authorization` unless the user owns the item or is an admin.
    pub fn require_access(&self, owner: UserId) -> Result<(), AppError> {
        if self.can_access(owner) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You do not have permission to access this resource",
            ))
        }
    }

    /// Fails with `Authorization` unless the user is a system administrator.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_system {
            Ok(())
        } else {
            Err(AppError::authorization("System administrator access required"))
        }
    }
}
