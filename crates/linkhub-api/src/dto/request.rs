//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use linkhub_entity::resource::PasswordChange;
use linkhub_entity::resource::rsvp::NewRsvp;
use linkhub_entity::user::UserStatus;
use linkhub_service::ResourceUpdate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password for a protected public resource.
#[derive(Debug, Clone, Deserialize)]
pub struct UnlockRequest {
    pub password: String,
}

/// A guest's RSVP, with the invitation password when it has one.
#[derive(Debug, Clone, Deserialize)]
pub struct RsvpRequest {
    pub password: Option<String>,
    #[serde(flatten)]
    pub rsvp: NewRsvp,
}

/// Full replacement of a resource's editable fields.
///
/// `password` replaces the current password when non-empty;
/// `clear_password` removes protection. Sending neither keeps it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResourceRequest<D> {
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    pub password: Option<String>,
    #[serde(default)]
    pub clear_password: bool,
    #[serde(flatten)]
    pub detail: D,
}

impl<D> UpdateResourceRequest<D> {
    /// Converts into the service-level update.
    pub fn into_update(self) -> ResourceUpdate<D> {
        ResourceUpdate {
            is_enabled: self.is_enabled,
            detail: self.detail,
            password: PasswordChange::from_request(self.password, self.clear_password),
        }
    }
}

/// Attempted key change for an existing link.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeKeyRequest {
    pub key: String,
}

/// New account status set by a system admin.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UserStatusRequest {
    pub status: UserStatus,
}

fn default_enabled() -> bool {
    true
}
