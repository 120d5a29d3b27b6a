//! Digital business card entity model.

use linkhub_core::types::{CardId, LinkId, OrganizationId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::linked_resource;
use crate::audit::AuditStamp;
use crate::link::LinkKind;
use crate::validation::{hex_color, not_blank};

/// A digital business card published under a link. Cards never expire.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Card {
    /// Unique card identifier.
    pub id: CardId,
    /// Publishing link.
    pub link_id: LinkId,
    /// Key of the publishing link.
    pub link_key: String,
    /// Owning account.
    pub creator_user_id: UserId,
    /// Optional owning organization.
    pub organization_id: Option<OrganizationId>,
    /// Whether the card is publicly visible.
    pub is_enabled: bool,
    /// Contact details.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub detail: CardDetail,
    /// Argon2 hash of the access password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Audit columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditStamp,
}

linked_resource!(
    Card,
    LinkKind::Card,
    owner = creator_user_id,
    until = |_r| None
);

impl Card {
    /// Full display name including honorifics.
    pub fn display_name(&self) -> String {
        let d = &self.detail;
        [
            d.prefix.as_deref(),
            Some(d.first_name.as_str()),
            Some(d.last_name.as_str()),
            d.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Editable card fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct CardDetail {
    /// Honorific such as "Dr.".
    #[validate(length(max = 20))]
    pub prefix: Option<String>,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub last_name: String,
    /// Suffix such as "PhD".
    #[validate(length(max = 20))]
    pub suffix: Option<String>,
    /// Job title.
    #[validate(length(max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 150))]
    pub company: Option<String>,
    #[validate(length(max = 100))]
    pub department: Option<String>,
    pub bio: Option<String>,
    #[validate(email, length(max = 100))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(url, length(max = 255))]
    pub website: Option<String>,
    pub address: Option<String>,
    #[validate(url, length(max = 255))]
    pub linkedin_url: Option<String>,
    #[validate(url, length(max = 255))]
    pub twitter_url: Option<String>,
    #[validate(url, length(max = 255))]
    pub github_url: Option<String>,
    #[validate(url, length(max = 255))]
    pub instagram_url: Option<String>,
    #[validate(url, length(max = 500))]
    pub profile_picture_url: Option<String>,
    #[validate(url, length(max = 500))]
    pub logo_url: Option<String>,
    /// Visual theme name.
    #[validate(length(max = 50))]
    pub theme: Option<String>,
    #[validate(custom(function = "hex_color"))]
    pub primary_color: Option<String>,
    #[validate(custom(function = "hex_color"))]
    pub secondary_color: Option<String>,
    /// Whether visitors may download a vCard.
    #[serde(default = "default_true")]
    pub allow_save_contact: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    fn detail() -> CardDetail {
        serde_json::from_value(serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace"
        }))
        .expect("minimal card")
    }

    #[test]
    fn test_minimal_card_is_valid() {
        let d = detail();
        assert!(d.allow_save_contact);
        assert!(validate(&d).is_ok());
    }

    #[test]
    fn test_missing_last_name_rejected() {
        let d = CardDetail {
            last_name: String::new(),
            ..detail()
        };
        let err = validate(&d).expect_err("empty last name");
        assert!(err.message.contains("last_name"));
    }

    #[test]
    fn test_display_name_skips_empty_parts() {
        let now = chrono::Utc::now();
        let card = Card {
            id: CardId(42),
            link_id: LinkId(1),
            link_key: "abcdefghijk".into(),
            creator_user_id: UserId(7),
            organization_id: None,
            is_enabled: true,
            detail: CardDetail {
                prefix: Some("Dr.".into()),
                suffix: Some(String::new()),
                ..detail()
            },
            password_hash: None,
            audit: AuditStamp {
                created_at: now,
                updated_at: now,
                created_by: None,
                updated_by: None,
            },
        };
        assert_eq!(card.display_name(), "Dr. Ada Lovelace");
    }

    #[test]
    fn test_bad_urls_rejected() {
        let d = CardDetail {
            github_url: Some("github".into()),
            ..detail()
        };
        assert!(validate(&d).is_err());
    }
}
