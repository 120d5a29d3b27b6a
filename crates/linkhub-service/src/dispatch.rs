//! Public dispatch: `GET /{key}` to the matching resource service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_database::DatabasePool;
use linkhub_database::repositories::LinkRepository;
use linkhub_entity::link::LinkKind;
use linkhub_entity::resource::LinkedResource;
use linkhub_entity::resource::appointment::{Appointment, AppointmentDetail};
use linkhub_entity::resource::card::{Card, CardDetail};
use linkhub_entity::resource::form::Form;
use linkhub_entity::resource::invitation::{Invitation, InvitationDetail};

use crate::link::LinkResolver;
use crate::resource::{AppointmentService, CardService, FormService, InvitationService};

/// The public content behind a key.
///
/// Only detail fields a visitor needs are carried. Owner, tenant, audit and
/// link bookkeeping stay on the panel side.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PublicResource {
    Invitation(InvitationDetail),
    Appointment(AppointmentDetail),
    Form(PublicForm),
    Card(PublicCard),
}

/// A form as respondents see it. The owner's notification address is
/// left out.
#[derive(Debug, Clone, Serialize)]
pub struct PublicForm {
    pub title: String,
    pub description: Option<String>,
    pub submission_limit: Option<i32>,
    pub limit_per_user: Option<i32>,
    pub closes_at: Option<DateTime<Utc>>,
    pub confirmation_message: Option<String>,
    pub redirect_url: Option<String>,
    pub requires_login: bool,
}

/// A business card with its ready-made display name.
#[derive(Debug, Clone, Serialize)]
pub struct PublicCard {
    pub display_name: String,
    #[serde(flatten)]
    pub detail: CardDetail,
}

impl From<Invitation> for PublicResource {
    fn from(invitation: Invitation) -> Self {
        Self::Invitation(invitation.detail)
    }
}

impl From<Appointment> for PublicResource {
    fn from(appointment: Appointment) -> Self {
        Self::Appointment(appointment.detail)
    }
}

impl From<Form> for PublicResource {
    fn from(form: Form) -> Self {
        let d = form.detail;
        Self::Form(PublicForm {
            title: d.title,
            description: d.description,
            submission_limit: d.submission_limit,
            limit_per_user: d.limit_per_user,
            closes_at: d.closes_at,
            confirmation_message: d.confirmation_message,
            redirect_url: d.redirect_url,
            requires_login: d.requires_login,
        })
    }
}

impl From<Card> for PublicResource {
    fn from(card: Card) -> Self {
        Self::Card(PublicCard {
            display_name: card.display_name(),
            detail: card.detail,
        })
    }
}

/// What `GET /{key}` returns.
#[derive(Debug, Clone, Serialize)]
pub struct PublicView {
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub key: String,
    /// Whether the content was unlocked with a password.
    pub password_protected: bool,
    pub resource: PublicResource,
}

impl PublicView {
    /// Project a visible resource row onto its public view.
    pub fn of<R>(key: String, record: R) -> Self
    where
        R: LinkedResource + Into<PublicResource>,
    {
        Self {
            kind: R::KIND,
            key,
            password_protected: record.is_password_protected(),
            resource: record.into(),
        }
    }
}

/// Routes a key to the service owning its link type.
#[derive(Debug, Clone)]
pub struct PublicDispatcher {
    db: DatabasePool,
    resolver: Arc<LinkResolver<LinkRepository>>,
    invitations: Arc<InvitationService>,
    appointments: Arc<AppointmentService>,
    forms: Arc<FormService>,
    cards: Arc<CardService>,
}

impl PublicDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        db: DatabasePool,
        resolver: Arc<LinkResolver<LinkRepository>>,
        invitations: Arc<InvitationService>,
        appointments: Arc<AppointmentService>,
        forms: Arc<FormService>,
        cards: Arc<CardService>,
    ) -> Self {
        Self {
            db,
            resolver,
            invitations,
            appointments,
            forms,
            cards,
        }
    }

    /// Resolve `key` and load its public resource.
    ///
    /// A type name this build does not know is `NotFound`.
    pub async fn dispatch(&self, key: &str, password: Option<&str>) -> AppResult<PublicView> {
        let link = {
            let mut conn = self.db.acquire().await?;
            self.resolver.resolve(&mut *conn, key).await?
        };

        let Some(kind) = link.kind() else {
            warn!(
                link_id = %link.id,
                type_name = %link.type_name,
                "Link has an unsupported type"
            );
            return Err(AppError::not_found("Link not found"));
        };

        let view = match kind {
            LinkKind::Invitation => {
                PublicView::of(link.key, self.invitations.get_by_key(key, password).await?)
            }
            LinkKind::Appointment => {
                PublicView::of(link.key, self.appointments.get_by_key(key, password).await?)
            }
            LinkKind::Form => PublicView::of(link.key, self.forms.get_by_key(key, password).await?),
            LinkKind::Card => PublicView::of(link.key, self.cards.get_by_key(key, password).await?),
        };

        Ok(view)
    }
}
