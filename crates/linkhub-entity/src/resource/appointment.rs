//! Appointment entity model.

use chrono::{DateTime, Utc};
use linkhub_core::types::{AppointmentId, LinkId, OrganizationId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::linked_resource;
use crate::audit::AuditStamp;
use crate::link::LinkKind;
use crate::validation::{currency_code, hex_color, not_blank};

/// A bookable service offered by a provider.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: AppointmentId,
    /// Publishing link.
    pub link_id: LinkId,
    /// Key of the publishing link.
    pub link_key: String,
    /// The user who provides the service and owns the row.
    pub provider_user_id: UserId,
    /// Optional owning organization.
    pub organization_id: Option<OrganizationId>,
    /// Whether the booking page is publicly visible.
    pub is_enabled: bool,
    /// Offering details.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub detail: AppointmentDetail,
    /// Argon2 hash of the access password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Audit columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditStamp,
}

linked_resource!(
    Appointment,
    LinkKind::Appointment,
    owner = provider_user_id,
    until = |r| r.detail.expires_at
);

/// Editable appointment fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct AppointmentDetail {
    /// Service name.
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub name: String,
    /// Long description.
    pub description: Option<String>,
    /// Length of one slot.
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: i32,
    /// Price in minor currency units.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price_minor: i64,
    /// ISO 4217 currency code.
    #[serde(default = "default_currency")]
    #[validate(custom(function = "currency_code"))]
    pub currency: String,
    /// Whether bookings wait for provider approval.
    #[serde(default)]
    pub requires_approval: bool,
    /// Gap kept free before each slot.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub buffer_before_minutes: i32,
    /// Gap kept free after each slot.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub buffer_after_minutes: i32,
    /// Minimum notice before a slot can be booked.
    #[serde(default = "default_lead_minutes")]
    #[validate(range(min = 0))]
    pub booking_lead_minutes: i32,
    /// How far ahead slots can be booked.
    #[serde(default = "default_horizon_days")]
    #[validate(range(min = 1, max = 365))]
    pub booking_horizon_days: i32,
    /// Calendar colour.
    #[validate(custom(function = "hex_color"))]
    pub color_code: Option<String>,
    /// Cancellation terms shown to guests.
    pub cancellation_policy: Option<String>,
    /// End of public visibility.
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "TRY".to_string()
}

fn default_lead_minutes() -> i32 {
    60
}

fn default_horizon_days() -> i32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    fn detail() -> AppointmentDetail {
        serde_json::from_value(serde_json::json!({
            "name": "Consultation",
            "duration_minutes": 30
        }))
        .expect("minimal appointment")
    }

    #[test]
    fn test_defaults_applied() {
        let d = detail();
        assert_eq!(d.currency, "TRY");
        assert_eq!(d.booking_lead_minutes, 60);
        assert_eq!(d.booking_horizon_days, 30);
        assert!(validate(&d).is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let d = AppointmentDetail {
            duration_minutes: 0,
            ..detail()
        };
        let err = validate(&d).expect_err("zero duration");
        assert!(err.message.contains("duration_minutes"));
    }

    #[test]
    fn test_negative_buffer_rejected() {
        let d = AppointmentDetail {
            buffer_after_minutes: -5,
            ..detail()
        };
        assert!(validate(&d).is_err());
    }

    #[test]
    fn test_bad_colour_rejected() {
        let d = AppointmentDetail {
            color_code: Some("red".into()),
            ..detail()
        };
        assert!(validate(&d).is_err());
    }
}
