//! Inputs to resource creation and update.

use serde::Deserialize;

use linkhub_core::types::OrganizationId;
use linkhub_entity::resource::PasswordChange;

/// A resource to create. The detail fields sit at the top level of the JSON
/// body next to the common ones.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDraft<D> {
    /// Whether the resource is publicly visible once created.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    /// Optional access password, stored as an Argon2 hash.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(flatten)]
    pub detail: D,
}

/// A full replacement of a resource's editable fields.
#[derive(Debug, Clone)]
pub struct ResourceUpdate<D> {
    pub is_enabled: bool,
    pub detail: D,
    pub password: PasswordChange,
}

fn default_enabled() -> bool {
    true
}
