//! Invitation RSVP repository implementation.

use sqlx::PgConnection;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::types::{InvitationId, PageRequest, PageResponse};
use linkhub_entity::resource::rsvp::{InvitationRsvp, NewRsvp, RsvpStatus};

/// Repository for guest answers to invitations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsvpRepository;

impl RsvpRepository {
    /// Create a new RSVP repository.
    pub fn new() -> Self {
        Self
    }

    /// Insert or replace the live answer of one guest, keyed by email.
    pub async fn upsert(
        &self,
        conn: &mut PgConnection,
        invitation_id: InvitationId,
        rsvp: &NewRsvp,
    ) -> AppResult<InvitationRsvp> {
        sqlx::query_as::<_, InvitationRsvp>(
            r#"
            INSERT INTO invitation_rsvps
                (invitation_id, guest_name, guest_email, status, plus_ones, notes, responded_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (invitation_id, lower(guest_email)) WHERE deleted_at IS NULL
            DO UPDATE SET
                guest_name = EXCLUDED.guest_name,
                status = EXCLUDED.status,
                plus_ones = EXCLUDED.plus_ones,
                notes = EXCLUDED.notes,
                responded_at = EXCLUDED.responded_at,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(invitation_id)
        .bind(rsvp.guest_name.trim())
        .bind(rsvp.guest_email.trim())
        .bind(rsvp.status)
        .bind(rsvp.plus_ones)
        .bind(&rsvp.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save RSVP", e))
    }

    /// List live answers of an invitation, most recent first.
    pub async fn list_for_invitation(
        &self,
        conn: &mut PgConnection,
        invitation_id: InvitationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<InvitationRsvp>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invitation_rsvps WHERE invitation_id = $1 AND deleted_at IS NULL",
        )
        .bind(invitation_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count RSVPs", e))?;

        let rsvps = sqlx::query_as::<_, InvitationRsvp>(
            "SELECT * FROM invitation_rsvps WHERE invitation_id = $1 AND deleted_at IS NULL \
             ORDER BY responded_at DESC NULLS LAST, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(invitation_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list RSVPs", e))?;

        Ok(PageResponse::new(rsvps, page.page, page.page_size, total as u64))
    }

    /// Count live answers per status.
    pub async fn count_by_status(
        &self,
        conn: &mut PgConnection,
        invitation_id: InvitationId,
    ) -> AppResult<Vec<(RsvpStatus, i64)>> {
        sqlx::query_as::<_, (RsvpStatus, i64)>(
            "SELECT status, COUNT(*) FROM invitation_rsvps \
             WHERE invitation_id = $1 AND deleted_at IS NULL GROUP BY status ORDER BY status",
        )
        .bind(invitation_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to summarise RSVPs", e))
    }
}
