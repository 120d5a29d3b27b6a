//! Audit columns shared by every mutable table.

use chrono::{DateTime, Utc};
use linkhub_core::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Creation and last-update bookkeeping stamped by the repositories.
///
/// Soft-deleted rows never leave the repositories, so `deleted_at` and
/// `deleted_by` are not part of this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuditStamp {
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
    /// Acting user at insert time.
    pub created_by: Option<UserId>,
    /// Acting user at the last modification.
    pub updated_by: Option<UserId>,
}
