//! Appointment repository implementation.

use std::sync::LazyLock;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgConnection, Postgres};

use linkhub_core::result::AppResult;
use linkhub_entity::resource::appointment::{Appointment, AppointmentDetail};

use super::resource::{
    NewResource, ResourceChanges, ResourceRepository, insert_sql, update_sql, write_error,
};

const DETAIL_COLUMNS: &[&str] = &[
    "name",
    "description",
    "duration_minutes",
    "price_minor",
    "currency",
    "requires_approval",
    "buffer_before_minutes",
    "buffer_after_minutes",
    "booking_lead_minutes",
    "booking_horizon_days",
    "color_code",
    "cancellation_policy",
    "expires_at",
];

static INSERT_SQL: LazyLock<String> =
    LazyLock::new(|| insert_sql("appointments", "provider_user_id", DETAIL_COLUMNS));
static UPDATE_SQL: LazyLock<String> = LazyLock::new(|| update_sql("appointments", DETAIL_COLUMNS));

/// Repository for appointment offerings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentRepository;

impl AppointmentRepository {
    /// Create a new appointment repository.
    pub fn new() -> Self {
        Self
    }
}

fn bind_detail<'q>(
    query: QueryAs<'q, Postgres, Appointment, PgArguments>,
    d: &'q AppointmentDetail,
) -> QueryAs<'q, Postgres, Appointment, PgArguments> {
    query
        .bind(&d.name)
        .bind(&d.description)
        .bind(d.duration_minutes)
        .bind(d.price_minor)
        .bind(&d.currency)
        .bind(d.requires_approval)
        .bind(d.buffer_before_minutes)
        .bind(d.buffer_after_minutes)
        .bind(d.booking_lead_minutes)
        .bind(d.booking_horizon_days)
        .bind(&d.color_code)
        .bind(&d.cancellation_policy)
        .bind(d.expires_at)
}

#[async_trait]
impl ResourceRepository for AppointmentRepository {
    type Record = Appointment;
    type Detail = AppointmentDetail;

    const TABLE: &'static str = "appointments";
    const OWNER_COLUMN: &'static str = "provider_user_id";
    const SEARCH_EXPR: &'static str = "r.name";

    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewResource<'_, AppointmentDetail>,
    ) -> AppResult<Appointment> {
        bind_detail(sqlx::query_as::<_, Appointment>(INSERT_SQL.as_str()), new.detail)
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
        changes: ResourceChanges<'_, AppointmentDetail>,
    ) -> AppResult<Option<Appointment>> {
        bind_detail(sqlx::query_as::<_, Appointment>(UPDATE_SQL.as_str()), changes.detail)
            .bind(id)
            .bind(changes.is_enabled)
            .bind(changes.password_hash)
            .bind(changes.actor)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| write_error(Self::TABLE, "update", e))
    }
}
