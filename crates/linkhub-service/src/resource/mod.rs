//! Services for the four link-addressed resource kinds.
//!
//! All four share one implementation, [`ResourceService`], parameterised by
//! the resource repository; they differ only in their detail fields.

pub mod access;
pub mod draft;
pub mod service;

pub use draft::{ResourceDraft, ResourceUpdate};
pub use service::{LinkCore, ResourceService};

use linkhub_database::repositories::{
    AppointmentRepository, CardRepository, FormRepository, InvitationRepository,
};

/// Invitation CRUD.
pub type InvitationService = ResourceService<InvitationRepository>;
/// Appointment CRUD.
pub type AppointmentService = ResourceService<AppointmentRepository>;
/// Form CRUD.
pub type FormService = ResourceService<FormRepository>;
/// Card CRUD.
pub type CardService = ResourceService<CardRepository>;
