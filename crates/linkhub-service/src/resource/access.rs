//! Public visibility rules for link-addressed resources.

use chrono::{DateTime, Utc};
use tracing::debug;

use linkhub_auth::password::PasswordHasher;
use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_entity::link::Link;
use linkhub_entity::resource::LinkedResource;

/// Decide whether `record`, reached through `link`, may be shown publicly.
///
/// Everything except a missing or wrong password is reported as `NotFound`
/// so callers cannot tell a disabled resource from an absent one.
pub fn check_public_access<T: LinkedResource>(
    link: &Link,
    record: &T,
    password: Option<&str>,
    hasher: &PasswordHasher,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let hidden = |reason: &str| {
        debug!(link_id = %link.id, key = %link.key, reason, "Resource hidden from public view");
        AppError::not_found("Link not found")
    };

    if link.kind() != Some(T::KIND) || !link.has_target() {
        return Err(hidden("kind mismatch or target not backfilled"));
    }
    if record.raw_id() != link.target_id || record.link_id() != link.id {
        return Err(hidden("target does not point back at link"));
    }
    if !record.is_enabled() {
        return Err(hidden("disabled"));
    }
    if record.is_expired_at(now) {
        return Err(hidden("expired"));
    }

    if let Some(hash) = record.password_hash().filter(|h| !h.is_empty()) {
        let supplied = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::authentication("Password required"))?;
        if !hasher.verify_password(supplied, hash)? {
            debug!(link_id = %link.id, "Wrong resource password");
            return Err(AppError::authentication("Invalid password"));
        }
    }

    Ok(())
}
