//! Form repository implementation.

use std::sync::LazyLock;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgConnection, Postgres};

use linkhub_core::result::AppResult;
use linkhub_entity::resource::form::{Form, FormDetail};

use super::resource::{
    NewResource, ResourceChanges, ResourceRepository, insert_sql, update_sql, write_error,
};

const DETAIL_COLUMNS: &[&str] = &[
    "title",
    "description",
    "submission_limit",
    "limit_per_user",
    "closes_at",
    "confirmation_message",
    "redirect_url",
    "notify_email",
    "requires_login",
];

static INSERT_SQL: LazyLock<String> =
    LazyLock::new(|| insert_sql("forms", "creator_user_id", DETAIL_COLUMNS));
static UPDATE_SQL: LazyLock<String> = LazyLock::new(|| update_sql("forms", DETAIL_COLUMNS));

/// Repository for data collection forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormRepository;

impl FormRepository {
    /// Create a new form repository.
    pub fn new() -> Self {
        Self
    }
}

fn bind_detail<'q>(
    query: QueryAs<'q, Postgres, Form, PgArguments>,
    d: &'q FormDetail,
) -> QueryAs<'q, Postgres, Form, PgArguments> {
    query
        .bind(&d.title)
        .bind(&d.description)
        .bind(d.submission_limit)
        .bind(d.limit_per_user)
        .bind(d.closes_at)
        .bind(&d.confirmation_message)
        .bind(&d.redirect_url)
        .bind(&d.notify_email)
        .bind(d.requires_login)
}

#[async_trait]
impl ResourceRepository for FormRepository {
    type Record = Form;
    type Detail = FormDetail;

    const TABLE: &'static str = "forms";
    const OWNER_COLUMN: &'static str = "creator_user_id";
    const SEARCH_EXPR: &'static str = "r.title";

    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewResource<'_, FormDetail>,
    ) -> AppResult<Form> {
        bind_detail(sqlx::query_as::<_, Form>(INSERT_SQL.as_str()), new.detail)
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
        changes: ResourceChanges<'_, FormDetail>,
    ) -> AppResult<Option<Form>> {
        bind_detail(sqlx::query_as::<_, Form>(UPDATE_SQL.as_str()), changes.detail)
            .bind(id)
            .bind(changes.is_enabled)
            .bind(changes.password_hash)
            .bind(changes.actor)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| write_error(Self::TABLE, "update", e))
    }
}
