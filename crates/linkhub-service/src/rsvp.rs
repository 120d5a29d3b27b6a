//! Guest answers to invitations.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::{InvitationId, PageRequest, PageResponse};
use linkhub_database::DatabasePool;
use linkhub_database::repositories::RsvpRepository;
use linkhub_entity::resource::invitation::Invitation;
use linkhub_entity::resource::rsvp::{InvitationRsvp, NewRsvp, RsvpStatus};
use linkhub_entity::validation::validate;

use crate::context::RequestContext;
use crate::resource::InvitationService;

/// Number of live answers with one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RsvpTally {
    pub status: RsvpStatus,
    pub count: i64,
}

/// Records and lists RSVPs.
#[derive(Debug, Clone)]
pub struct RsvpService {
    db: DatabasePool,
    invitations: Arc<InvitationService>,
    repo: RsvpRepository,
}

impl RsvpService {
    /// Creates a new RSVP service.
    pub fn new(db: DatabasePool, invitations: Arc<InvitationService>) -> Self {
        Self {
            db,
            invitations,
            repo: RsvpRepository::new(),
        }
    }

    /// Record a guest's answer to the invitation behind `key`.
    ///
    /// A second answer from the same email replaces the first.
    pub async fn submit(
        &self,
        key: &str,
        password: Option<&str>,
        rsvp: NewRsvp,
    ) -> AppResult<InvitationRsvp> {
        validate(&rsvp)?;
        let invitation = self.invitations.get_by_key(key, password).await?;
        check_answer(&invitation, &rsvp)?;

        let mut conn = self.db.acquire().await?;
        let saved = self.repo.upsert(&mut *conn, invitation.id, &rsvp).await?;

        info!(
            invitation_id = %invitation.id,
            rsvp_id = %saved.id,
            status = %saved.status,
            "RSVP recorded"
        );
        Ok(saved)
    }

    /// List answers to an invitation, owner or system admin only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        invitation_id: InvitationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<InvitationRsvp>> {
        let invitation = self.invitations.get_by_id(ctx, invitation_id.0).await?;
        let mut conn = self.db.acquire().await?;
        self.repo
            .list_for_invitation(&mut *conn, invitation.id, page)
            .await
    }

    /// Count answers per status, owner or system admin only.
    pub async fn tally(
        &self,
        ctx: &RequestContext,
        invitation_id: InvitationId,
    ) -> AppResult<Vec<RsvpTally>> {
        let invitation = self.invitations.get_by_id(ctx, invitation_id.0).await?;
        let mut conn = self.db.acquire().await?;
        let counts = self.repo.count_by_status(&mut *conn, invitation.id).await?;
        Ok(counts
            .into_iter()
            .map(|(status, count)| RsvpTally { status, count })
            .collect())
    }
}

/// Business rules an answer must satisfy for this invitation.
fn check_answer(invitation: &Invitation, rsvp: &NewRsvp) -> AppResult<()> {
    if !rsvp.status.is_answer() {
        return Err(AppError::validation(
            "status: must be attending, not_attending or maybe",
        ));
    }
    if !invitation.accepts_rsvp_at(Utc::now()) {
        return Err(AppError::validation("The RSVP deadline has passed"));
    }
    if rsvp.plus_ones > 0 {
        if !invitation.detail.allow_plus_ones {
            return Err(AppError::validation(
                "plus_ones: this invitation does not allow additional guests",
            ));
        }
        if rsvp.plus_ones > invitation.detail.max_plus_ones {
            return Err(AppError::validation(format!(
                "plus_ones: at most {} additional guests allowed",
                invitation.detail.max_plus_ones
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use linkhub_core::ErrorKind;
    use linkhub_core::types::{LinkId, UserId};
    use linkhub_entity::audit::AuditStamp;
    use linkhub_entity::resource::invitation::InvitationDetail;

    use super::*;

    fn invitation(detail: serde_json::Value) -> Invitation {
        let detail: InvitationDetail = serde_json::from_value(detail).expect("detail");
        Invitation {
            id: InvitationId(3),
            link_id: LinkId(9),
            link_key: "inviteKey01".into(),
            creator_user_id: UserId(7),
            organization_id: None,
            is_enabled: true,
            detail,
            password_hash: None,
            audit: AuditStamp {
                created_at: Utc::now(),
                updated_at: Utc::now(),
                created_by: None,
                updated_by: None,
            },
        }
    }

    fn answer(status: RsvpStatus, plus_ones: i32) -> NewRsvp {
        NewRsvp {
            guest_name: "Grace".into(),
            guest_email: "grace@example.com".into(),
            status,
            plus_ones,
            notes: None,
        }
    }

    #[test]
    fn test_accepts_valid_answer() {
        let inv = invitation(serde_json::json!({
            "title": "Launch",
            "event_at": "2030-01-01T18:00:00Z",
            "max_plus_ones": 2
        }));
        assert!(check_answer(&inv, &answer(RsvpStatus::Attending, 2)).is_ok());
        assert!(check_answer(&inv, &answer(RsvpStatus::Maybe, 0)).is_ok());
    }

    #[test]
    fn test_rejects_pending_and_too_many_guests() {
        let inv = invitation(serde_json::json!({
            "title": "Launch",
            "event_at": "2030-01-01T18:00:00Z"
        }));
        let pending = check_answer(&inv, &answer(RsvpStatus::Pending, 0)).unwrap_err();
        assert_eq!(pending.kind, ErrorKind::Validation);

        let crowd = check_answer(&inv, &answer(RsvpStatus::Attending, 2)).unwrap_err();
        assert!(crowd.message.contains("at most 1"));
    }

    #[test]
    fn test_rejects_plus_ones_when_disallowed() {
        let inv = invitation(serde_json::json!({
            "title": "Dinner",
            "event_at": "2030-01-01T18:00:00Z",
            "allow_plus_ones": false
        }));
        assert!(check_answer(&inv, &answer(RsvpStatus::Attending, 1)).is_err());
        assert!(check_answer(&inv, &answer(RsvpStatus::Attending, 0)).is_ok());
    }

    #[test]
    fn test_rejects_after_deadline() {
        let deadline = Utc::now() - Duration::hours(1);
        let inv = invitation(serde_json::json!({
            "title": "Launch",
            "event_at": "2030-01-01T18:00:00Z",
            "rsvp_deadline": deadline
        }));
        let err = check_answer(&inv, &answer(RsvpStatus::Attending, 0)).unwrap_err();
        assert!(err.message.contains("deadline"));
    }
}
