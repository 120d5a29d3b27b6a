//! # linkhub-service
//!
//! Business logic service layer for LinkHub. The `link` module holds the
//! key issuance and resolution core; the resource services build on it to
//! create, read, update and delete the four link-addressed resource kinds.
//!
//! Services receive their dependencies as `Arc` handles when they are
//! built and never reach for globals.

pub mod context;
pub mod dispatch;
pub mod link;
pub mod resource;
pub mod rsvp;
pub mod summary;
pub mod user;

pub use context::RequestContext;
pub use dispatch::{PublicCard, PublicDispatcher, PublicForm, PublicResource, PublicView};
pub use link::{
    KeyGenerator, LinkIssuer, LinkResolver, LinkService, LinkTypeRegistry, SecureKeyGenerator,
};
pub use resource::{
    AppointmentService, CardService, FormService, InvitationService, LinkCore, ResourceDraft,
    ResourceService, ResourceUpdate,
};
pub use rsvp::{RsvpService, RsvpTally};
pub use summary::{OwnerSummary, PlatformSummary, SummaryService};
pub use user::{AuthService, CreateUserRequest, LoginResult, UserAdminService};
