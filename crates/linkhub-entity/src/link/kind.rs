//! Link type names and the typed target they select.

use std::fmt;
use std::str::FromStr;

use linkhub_core::AppError;
use linkhub_core::types::{AppointmentId, CardId, FormId, InvitationId, LinkTypeId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The four resource kinds a link can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkKind {
    /// Event invitation with RSVP.
    Invitation,
    /// Bookable appointment offering.
    Appointment,
    /// Data collection form.
    Form,
    /// Digital business card.
    Card,
}

impl LinkKind {
    /// Every kind, in seeding order.
    pub const ALL: [LinkKind; 4] = [Self::Invitation, Self::Appointment, Self::Form, Self::Card];

    /// The name stored in `link_types.name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invitation => "INVITATION",
            Self::Appointment => "APPOINTMENT",
            Self::Form => "FORM",
            Self::Card => "CARD",
        }
    }

    /// Human-readable description stored alongside the name.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Invitation => "Event invitation",
            Self::Appointment => "Appointment booking page",
            Self::Form => "Data collection form",
            Self::Card => "Digital business card",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INVITATION" => Ok(Self::Invitation),
            "APPOINTMENT" => Ok(Self::Appointment),
            "FORM" => Ok(Self::Form),
            "CARD" => Ok(Self::Card),
            other => Err(AppError::not_found(format!("Unsupported link type '{other}'"))),
        }
    }
}

/// A row of the `link_types` lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LinkTypeRecord {
    /// Type identifier referenced by `links.type_id`.
    pub id: LinkTypeId,
    /// Upper-case type name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// The resource a link points at, with the id typed by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkTarget {
    /// An invitation row.
    Invitation(InvitationId),
    /// An appointment row.
    Appointment(AppointmentId),
    /// A form row.
    Form(FormId),
    /// A card row.
    Card(CardId),
}

impl LinkTarget {
    /// Build a target from a kind and a raw `target_id`.
    ///
    /// Returns `None` for the unset placeholder (`0`) or negative ids.
    pub fn from_parts(kind: LinkKind, raw: i64) -> Option<Self> {
        if raw <= 0 {
            return None;
        }
        Some(match kind {
            LinkKind::Invitation => Self::Invitation(InvitationId(raw)),
            LinkKind::Appointment => Self::Appointment(AppointmentId(raw)),
            LinkKind::Form => Self::Form(FormId(raw)),
            LinkKind::Card => Self::Card(CardId(raw)),
        })
    }

    /// The kind of resource targeted.
    pub fn kind(&self) -> LinkKind {
        match self {
            Self::Invitation(_) => LinkKind::Invitation,
            Self::Appointment(_) => LinkKind::Appointment,
            Self::Form(_) => LinkKind::Form,
            Self::Card(_) => LinkKind::Card,
        }
    }

    /// The raw id stored in `links.target_id`.
    pub fn raw_id(&self) -> i64 {
        match self {
            Self::Invitation(id) => id.0,
            Self::Appointment(id) => id.0,
            Self::Form(id) => id.0,
            Self::Card(id) => id.0,
        }
    }
}
