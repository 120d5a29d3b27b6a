//! Link row model.

use linkhub_core::types::{LinkId, LinkTypeId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::kind::{LinkKind, LinkTarget};
use crate::audit::AuditStamp;

/// A live (not soft-deleted) link, joined with its type name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Link {
    /// Surrogate identifier.
    pub id: LinkId,
    /// Public key; never changes after insert.
    pub key: String,
    /// Foreign key into `link_types`.
    pub type_id: LinkTypeId,
    /// `link_types.name` for `type_id`.
    pub type_name: String,
    /// Id of the target row in the table implied by the type; `0` until backfilled.
    pub target_id: i64,
    /// Owning account.
    pub creator_user_id: UserId,
    /// Audit columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Link {
    /// The parsed kind, or `None` for a type name this build does not know.
    pub fn kind(&self) -> Option<LinkKind> {
        self.type_name.parse().ok()
    }

    /// The typed target, or `None` while the target is not yet backfilled.
    pub fn target(&self) -> Option<LinkTarget> {
        LinkTarget::from_parts(self.kind()?, self.target_id)
    }

    /// Whether the target id has been backfilled.
    pub fn has_target(&self) -> bool {
        self.target_id > 0
    }
}

/// Values for inserting a link during issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    /// Candidate key.
    pub key: String,
    /// Link type.
    pub type_id: LinkTypeId,
    /// Owning and acting account.
    pub creator_user_id: UserId,
}
