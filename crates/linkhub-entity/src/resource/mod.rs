//! The four link-addressed resource kinds and what they share.

pub mod appointment;
pub mod card;
pub mod form;
pub mod invitation;
pub mod rsvp;

use chrono::{DateTime, Utc};
use linkhub_core::types::{LinkId, UserId};

use crate::link::LinkKind;

/// Behaviour common to every resource addressed by a link.
pub trait LinkedResource: Send + Sync {
    /// The link type this resource is published under.
    const KIND: LinkKind;

    /// Raw primary key, as stored in `links.target_id`.
    fn raw_id(&self) -> i64;

    /// The link that publishes this resource.
    fn link_id(&self) -> LinkId;

    /// The public key of that link.
    fn link_key(&self) -> &str;

    /// The owning account.
    fn owner_id(&self) -> UserId;

    /// Whether the owner has switched the resource on.
    fn is_enabled(&self) -> bool;

    /// Argon2 hash guarding public access, if any.
    fn password_hash(&self) -> Option<&str>;

    /// End of public visibility, if the resource has one.
    fn visible_until(&self) -> Option<DateTime<Utc>>;

    /// Whether the visibility window closed at or before `now`.
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.visible_until().is_some_and(|until| until <= now)
    }

    /// Whether a credential must be supplied before content is returned.
    fn is_password_protected(&self) -> bool {
        self.password_hash().is_some_and(|h| !h.is_empty())
    }
}

/// Requested change to a resource password on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PasswordChange {
    /// Leave the current password as is.
    #[default]
    Keep,
    /// Remove password protection.
    Clear,
    /// Replace the password with this plaintext.
    Set(String),
}

impl PasswordChange {
    /// Interpret the `password` / `clear_password` pair sent by clients.
    pub fn from_request(password: Option<String>, clear: bool) -> Self {
        match password {
            Some(p) if !p.is_empty() => Self::Set(p),
            _ if clear => Self::Clear,
            _ => Self::Keep,
        }
    }
}

/// Implement [`LinkedResource`] for a resource row with the usual columns.
macro_rules! linked_resource {
    ($ty:ty, $kind:expr, owner = $owner:ident, until = |$r:ident| $until:expr) => {
        impl $crate::resource::LinkedResource for $ty {
            const KIND: $crate::link::LinkKind = $kind;

            fn raw_id(&self) -> i64 {
                self.id.0
            }

            fn link_id(&self) -> linkhub_core::types::LinkId {
                self.link_id
            }

            fn link_key(&self) -> &str {
                &self.link_key
            }

            fn owner_id(&self) -> linkhub_core::types::UserId {
                self.$owner
            }

            fn is_enabled(&self) -> bool {
                self.is_enabled
            }

            fn password_hash(&self) -> Option<&str> {
                self.password_hash.as_deref()
            }

            fn visible_until(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                let $r = self;
                $until
            }
        }
    };
}

pub(crate) use linked_resource;
