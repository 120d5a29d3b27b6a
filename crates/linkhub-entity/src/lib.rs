//! # linkhub-entity
//!
//! Domain entity models for LinkHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; resource detail structs also carry their field rules
//! through `validator::Validate`.

pub mod audit;
pub mod link;
pub mod resource;
pub mod user;
pub mod validation;

pub use audit::AuditStamp;
pub use link::{KEY_ALPHABET, Link, LinkKind, LinkTarget, LinkTypeRecord, NewLink};
pub use resource::appointment::{Appointment, AppointmentDetail};
pub use resource::card::{Card, CardDetail};
pub use resource::form::{Form, FormDetail};
pub use resource::invitation::{Invitation, InvitationDetail};
pub use resource::rsvp::{InvitationRsvp, NewRsvp, RsvpStatus};
pub use resource::{LinkedResource, PasswordChange};
pub use user::{CreateUser, User, UserStatus};
