//! Card repository implementation.

use std::sync::LazyLock;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgConnection, Postgres};

use linkhub_core::result::AppResult;
use linkhub_entity::resource::card::{Card, CardDetail};

use super::resource::{
    NewResource, ResourceChanges, ResourceRepository, insert_sql, update_sql, write_error,
};

const DETAIL_COLUMNS: &[&str] = &[
    "prefix",
    "first_name",
    "last_name",
    "suffix",
    "title",
    "company",
    "department",
    "bio",
    "email",
    "phone",
    "website",
    "address",
    "linkedin_url",
    "twitter_url",
    "github_url",
    "instagram_url",
    "profile_picture_url",
    "logo_url",
    "theme",
    "primary_color",
    "secondary_color",
    "allow_save_contact",
];

static INSERT_SQL: LazyLock<String> =
    LazyLock::new(|| insert_sql("cards", "creator_user_id", DETAIL_COLUMNS));
static UPDATE_SQL: LazyLock<String> = LazyLock::new(|| update_sql("cards", DETAIL_COLUMNS));

/// Repository for digital business cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRepository;

impl CardRepository {
    /// Create a new card repository.
    pub fn new() -> Self {
        Self
    }
}

fn bind_detail<'q>(
    query: QueryAs<'q, Postgres, Card, PgArguments>,
    d: &'q CardDetail,
) -> QueryAs<'q, Postgres, Card, PgArguments> {
    query
        .bind(&d.prefix)
        .bind(&d.first_name)
        .bind(&d.last_name)
        .bind(&d.suffix)
        .bind(&d.title)
        .bind(&d.company)
        .bind(&d.department)
        .bind(&d.bio)
        .bind(&d.email)
        .bind(&d.phone)
        .bind(&d.website)
        .bind(&d.address)
        .bind(&d.linkedin_url)
        .bind(&d.twitter_url)
        .bind(&d.github_url)
        .bind(&d.instagram_url)
        .bind(&d.profile_picture_url)
        .bind(&d.logo_url)
        .bind(&d.theme)
        .bind(&d.primary_color)
        .bind(&d.secondary_color)
        .bind(d.allow_save_contact)
}

#[async_trait]
impl ResourceRepository for CardRepository {
    type Record = Card;
    type Detail = CardDetail;

    const TABLE: &'static str = "cards";
    const OWNER_COLUMN: &'static str = "creator_user_id";
    const SEARCH_EXPR: &'static str = "(r.first_name || ' ' || r.last_name || ' ' || COALESCE(r.company, ''))";

    async fn insert(
        &self,
        conn: &mut PgConnection,
        new: NewResource<'_, CardDetail>,
    ) -> AppResult<Card> {
        bind_detail(sqlx::query_as::<_, Card>(INSERT_SQL.as_str()), new.detail)
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
        changes: ResourceChanges<'_, CardDetail>,
    ) -> AppResult<Option<Card>> {
        bind_detail(sqlx::query_as::<_, Card>(UPDATE_SQL.as_str()), changes.detail)
            .bind(id)
            .bind(changes.is_enabled)
            .bind(changes.password_hash)
            .bind(changes.actor)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| write_error(Self::TABLE, "update", e))
    }
}
