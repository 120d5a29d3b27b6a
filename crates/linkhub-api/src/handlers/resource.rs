//! Binds each resource repository to its service in [`AppState`], so the
//! panel and dashboard handlers can be written once and mounted per kind.

use serde::de::DeserializeOwned;
use validator::Validate;

use linkhub_database::repositories::{
    AppointmentRepository, CardRepository, FormRepository, InvitationRepository,
    ResourceRepository,
};
use linkhub_service::ResourceService;

use crate::state::AppState;

/// A resource kind served under `/api/panel/{segment}` and
/// `/api/dashboard/{segment}`.
pub trait ResourceRoutes: ResourceRepository
where
    Self::Detail: Validate + DeserializeOwned,
{
    /// Path segment, e.g. `invitations`.
    const SEGMENT: &'static str;

    /// The service for this kind.
    fn service(state: &AppState) -> &ResourceService<Self>
    where
        Self: Sized;
}

impl ResourceRoutes for InvitationRepository {
    const SEGMENT: &'static str = "invitations";

    fn service(state: &AppState) -> &ResourceService<Self> {
        &state.invitations
    }
}

impl ResourceRoutes for AppointmentRepository {
    const SEGMENT: &'static str = "appointments";

    fn service(state: &AppState) -> &ResourceService<Self> {
        &state.appointments
    }
}

impl ResourceRoutes for FormRepository {
    const SEGMENT: &'static str = "forms";

    fn service(state: &AppState) -> &ResourceService<Self> {
        &state.forms
    }
}

impl ResourceRoutes for CardRepository {
    const SEGMENT: &'static str = "cards";

    fn service(state: &AppState) -> &ResourceService<Self> {
        &state.cards
    }
}
