//! Repository implementations for all LinkHub entities.

pub mod appointment;
pub mod card;
pub mod form;
pub mod invitation;
pub mod link;
pub mod link_type;
pub mod resource;
pub mod rsvp;
pub mod user;

pub use appointment::AppointmentRepository;
pub use card::CardRepository;
pub use form::FormRepository;
pub use invitation::InvitationRepository;
pub use link::{LinkChanges, LinkRepository, LinkStore};
pub use link_type::LinkTypeRepository;
pub use resource::{NewResource, ResourceChanges, ResourceRepository};
pub use rsvp::RsvpRepository;
pub use user::UserRepository;
