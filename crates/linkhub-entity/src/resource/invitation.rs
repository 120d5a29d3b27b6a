//! Invitation entity model.

use chrono::{DateTime, Utc};
use linkhub_core::types::{InvitationId, LinkId, OrganizationId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::linked_resource;
use crate::audit::AuditStamp;
use crate::link::LinkKind;
use crate::validation::not_blank;

/// An event invitation published under a link.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invitation {
    /// Unique invitation identifier.
    pub id: InvitationId,
    /// Publishing link.
    pub link_id: LinkId,
    /// Key of the publishing link.
    pub link_key: String,
    /// Owning account.
    pub creator_user_id: UserId,
    /// Optional owning organization.
    pub organization_id: Option<OrganizationId>,
    /// Whether the invitation is publicly visible.
    pub is_enabled: bool,
    /// Event details.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub detail: InvitationDetail,
    /// Argon2 hash of the access password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Audit columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditStamp,
}

linked_resource!(
    Invitation,
    LinkKind::Invitation,
    owner = creator_user_id,
    until = |r| r.detail.expires_at
);

impl Invitation {
    /// Whether guests may still answer at `now`.
    pub fn accepts_rsvp_at(&self, now: DateTime<Utc>) -> bool {
        self.detail.rsvp_deadline.is_none_or(|deadline| now <= deadline)
    }
}

/// Editable invitation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[validate(schema(function = "validate_invitation_dates"))]
pub struct InvitationDetail {
    /// Event title.
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub title: String,
    /// Long description.
    pub description: Option<String>,
    /// When the event takes place.
    pub event_at: DateTime<Utc>,
    /// IANA timezone the event is presented in.
    #[serde(default = "default_timezone")]
    #[validate(length(min = 1, max = 50))]
    pub timezone: String,
    /// Venue as free text.
    #[validate(length(max = 255))]
    pub location_text: Option<String>,
    /// Map or venue URL.
    #[validate(url, length(max = 500))]
    pub location_url: Option<String>,
    /// Visual theme name.
    #[validate(length(max = 50))]
    pub theme: Option<String>,
    /// End of public visibility.
    pub expires_at: Option<DateTime<Utc>>,
    /// Last moment guests may RSVP.
    pub rsvp_deadline: Option<DateTime<Utc>>,
    /// Whether guests may bring companions.
    #[serde(default = "default_true")]
    pub allow_plus_ones: bool,
    /// Companion limit per guest.
    #[serde(default = "default_max_plus_ones")]
    #[validate(range(min = 0, max = 100))]
    pub max_plus_ones: i32,
    /// Whether the guest list is shown publicly.
    #[serde(default)]
    pub show_guest_list: bool,
}

fn validate_invitation_dates(detail: &InvitationDetail) -> Result<(), ValidationError> {
    if let (Some(deadline), Some(expires)) = (detail.rsvp_deadline, detail.expires_at) {
        if deadline > expires {
            let mut err = ValidationError::new("rsvp_deadline");
            err.message = Some("RSVP deadline must not be after the expiry date".into());
            return Err(err);
        }
    }
    Ok(())
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_plus_ones() -> i32 {
    1
}
