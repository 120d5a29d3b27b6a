//! Invitation RSVP entity model.

use chrono::{DateTime, Utc};
use linkhub_core::types::{InvitationId, RsvpId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::audit::AuditStamp;
use crate::validation::not_blank;

/// A guest's answer to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rsvp_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    /// No answer yet.
    Pending,
    /// The guest will attend.
    Attending,
    /// The guest will not attend.
    NotAttending,
    /// The guest is undecided.
    Maybe,
}

impl RsvpStatus {
    /// Whether this status is a real answer a guest can submit.
    pub fn is_answer(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Attending => "attending",
            Self::NotAttending => "not_attending",
            Self::Maybe => "maybe",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored RSVP.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvitationRsvp {
    pub id: RsvpId,
    pub invitation_id: InvitationId,
    pub guest_name: String,
    pub guest_email: String,
    pub status: RsvpStatus,
    pub plus_ones: i32,
    pub notes: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditStamp,
}

/// A guest's submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewRsvp {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub guest_name: String,
    /// Identifies the guest; one live RSVP per address and invitation.
    #[validate(email, length(max = 255))]
    pub guest_email: String,
    pub status: RsvpStatus,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub plus_ones: i32,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
