//! Resource counts for the panel and dashboard landing pages.

use std::sync::Arc;

use serde::Serialize;

use linkhub_core::result::AppResult;

use crate::context::RequestContext;
use crate::resource::{AppointmentService, CardService, FormService, InvitationService};
use crate::user::UserAdminService;

/// Live resources owned by one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub invitations: u64,
    pub appointments: u64,
    pub forms: u64,
    pub cards: u64,
}

/// Live resources and accounts across the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformSummary {
    pub users: u64,
    #[serde(flatten)]
    pub resources: OwnerSummary,
}

/// Aggregates counts from the resource services.
#[derive(Debug, Clone)]
pub struct SummaryService {
    invitations: Arc<InvitationService>,
    appointments: Arc<AppointmentService>,
    forms: Arc<FormService>,
    cards: Arc<CardService>,
    users: Arc<UserAdminService>,
}

impl SummaryService {
    /// Creates a new summary service.
    pub fn new(
        invitations: Arc<InvitationService>,
        appointments: Arc<AppointmentService>,
        forms: Arc<FormService>,
        cards: Arc<CardService>,
        users: Arc<UserAdminService>,
    ) -> Self {
        Self {
            invitations,
            appointments,
            forms,
            cards,
            users,
        }
    }

    /// Counts for the acting user's own resources.
    pub async fn for_owner(&self, ctx: &RequestContext) -> AppResult<OwnerSummary> {
        let owner = ctx.user_id;
        Ok(OwnerSummary {
            invitations: self.invitations.count_for_owner(owner).await?,
            appointments: self.appointments.count_for_owner(owner).await?,
            forms: self.forms.count_for_owner(owner).await?,
            cards: self.cards.count_for_owner(owner).await?,
        })
    }

    /// Counts across every user. System admin only.
    pub async fn platform(&self, ctx: &RequestContext) -> AppResult<PlatformSummary> {
        Ok(PlatformSummary {
            users: self.users.count_users(ctx).await?,
            resources: OwnerSummary {
                invitations: self.invitations.count_all(ctx).await?,
                appointments: self.appointments.count_all(ctx).await?,
                forms: self.forms.count_all(ctx).await?,
                cards: self.cards.count_all(ctx).await?,
            },
        })
    }
}
