//! Form entity model.

use chrono::{DateTime, Utc};
use linkhub_core::types::{FormId, LinkId, OrganizationId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::linked_resource;
use crate::audit::AuditStamp;
use crate::link::LinkKind;
use crate::validation::not_blank;

/// A data collection form published under a link.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Form {
    /// Unique form identifier.
    pub id: FormId,
    /// Publishing link.
    pub link_id: LinkId,
    /// Key of the publishing link.
    pub link_key: String,
    /// Owning account.
    pub creator_user_id: UserId,
    /// Optional owning organization.
    pub organization_id: Option<OrganizationId>,
    /// Whether the form is publicly visible.
    pub is_enabled: bool,
    /// Form settings.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub detail: FormDetail,
    /// Argon2 hash of the access password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Audit columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditStamp,
}

linked_resource!(
    Form,
    LinkKind::Form,
    owner = creator_user_id,
    until = |r| r.detail.closes_at
);

/// Editable form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct FormDetail {
    /// Form title.
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub title: String,
    /// Intro text.
    pub description: Option<String>,
    /// Total submissions accepted.
    #[validate(range(min = 0))]
    pub submission_limit: Option<i32>,
    /// Submissions accepted per respondent.
    #[validate(range(min = 0))]
    pub limit_per_user: Option<i32>,
    /// The form stops accepting answers and disappears at this time.
    pub closes_at: Option<DateTime<Utc>>,
    /// Message shown after submitting.
    pub confirmation_message: Option<String>,
    /// Where respondents are sent after submitting.
    #[validate(url, length(max = 500))]
    pub redirect_url: Option<String>,
    /// Address notified about new submissions.
    #[validate(email)]
    pub notify_email: Option<String>,
    /// Whether respondents must be logged in.
    #[serde(default)]
    pub requires_login: bool,
}
