//! Invitation repository implementation.

use std::sync::LazyLock;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgConnection, Postgres};

use linkhub_core::result::AppResult;
use linkhub_entity::resource::invitation::{Invitation, InvitationDetail};

use super::resource::{
    NewResource, ResourceChanges, ResourceRepository, insert_sql, update_sql, write_error,
};

const DETAIL_COLUMNS: &[&str] = &[
    "title",
    "description",
    "event_at",
    "timezone",
    "location_text",
    "location_url",
    "theme",
    "expires_at",
    "rsvp_deadline",
    "allow_plus_ones",
    "max_plus_ones",
    "show_guest_list",
];

static INSERT_SQL: LazyLock<String> =
    LazyLock::new(|| insert_sql("invitations", "creator_user_id", DETAIL_COLUMNS));
static UPDATE_SQL: LazyLock<String> = LazyLock::new(|| update_sql("invitations", DETAIL_COLUMNS));

/// Repository for event invitations.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvitationRepository;

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new() -> Self {
        Self
    }
}

fn bind_detail<'q>(
    query: QueryAs<'q, Postgres, Invitation, PgArguments>,
    d: &'q InvitationDetail,
) -> QueryAs<'q, Postgres, Invitation, PgArguments> {
    query
        .bind(&d.title)
        .bind(&d.description)
        .bind(d.event_at)
        .bind(&d.timezone)
        .bind(&d.location_text)
        .bind(&d.location_url)
        .bind(&d.theme)
        .bind(d.expires_at)
        .bind(d.rsvp_deadline)
        .bind(d.allow_plus_ones)
        .bind(d.max_plus_ones)
        .bind(d.show_guest_list)
}

#[async_trait]
impl ResourceRepository for InvitationRepository {
    type Record = Invitation;
    type Detail = InvitationDetail;

    const TABLE: &'static str = "invitations";
    const OWNER_COLUMN: &'static str = "creator_user_id";
    const SEARCH_EXPR: &'static str = "r.title";

    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewResource<'_, InvitationDetail>,
    ) -> AppResult<Invitation> {
        bind_detail(sqlx::query_as::<_, Invitation>(INSERT_SQL.as_str()), new.detail)
            .bind(new.link_id)
            .bind(new.owner)
            .bind(new.organization_id)
            .bind(new.is_enabled)
            .bind(new.password_hash)
            .bind(new.actor)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| write_error(Self::TABLE, "insert", e))
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        id: i64,
        changes: ResourceChanges<'_, InvitationDetail>,
    ) -> AppResult<Option<Invitation>> {
        bind_detail(sqlx::query_as::<_, Invitation>(UPDATE_SQL.as_str()), changes.detail)
            .bind(id)
            .bind(changes.is_enabled)
            .bind(changes.password_hash)
            .bind(changes.actor)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| write_error(Self::TABLE, "update", e))
    }
}
