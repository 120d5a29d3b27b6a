//! Generic create/read/update/delete for link-addressed resources.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use linkhub_auth::password::PasswordHasher;
use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::{ListQuery, PageResponse, UserId};
use linkhub_database::DatabasePool;
use linkhub_database::connection::commit;
use linkhub_database::repositories::{
    LinkChanges, LinkRepository, LinkStore, NewResource, ResourceChanges, ResourceRepository,
};
use linkhub_entity::link::LinkKind;
use linkhub_entity::resource::{LinkedResource, PasswordChange};
use linkhub_entity::validation::validate;

use super::access::check_public_access;
use super::draft::{ResourceDraft, ResourceUpdate};
use crate::context::RequestContext;
use crate::link::{LinkIssuer, LinkResolver, LinkTypeRegistry};

/// Link components every resource service needs.
#[derive(Debug, Clone)]
pub struct LinkCore {
    pub issuer: Arc<LinkIssuer<LinkRepository>>,
    pub resolver: Arc<LinkResolver<LinkRepository>>,
    pub registry: Arc<LinkTypeRegistry>,
}

/// CRUD for one resource kind, each resource published under its own link.
#[derive(Debug, Clone)]
pub struct ResourceService<R> {
    db: DatabasePool,
    repo: R,
    links: LinkRepository,
    core: LinkCore,
    hasher: PasswordHasher,
}

impl<R> ResourceService<R>
where
    R: ResourceRepository,
    R::Detail: Validate,
{
    /// Creates a new resource service.
    pub fn new(db: DatabasePool, repo: R, core: LinkCore) -> Self {
        Self {
            db,
            repo,
            links: LinkRepository::new(),
            core,
            hasher: PasswordHasher::new(),
        }
    }

    /// The kind of resource this service manages.
    pub fn kind(&self) -> LinkKind {
        <R::Record as LinkedResource>::KIND
    }

    /// Create a resource owned by the acting user.
    ///
    /// Issues the link, inserts the resource and backfills the link's target
    /// in one transaction. Nothing is visible unless all three succeed.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        draft: ResourceDraft<R::Detail>,
    ) -> AppResult<R::Record> {
        validate(&draft.detail)?;
        let password_hash = self.hash_optional(draft.password.as_deref())?;
        let type_id = self.core.registry.type_id(self.kind())?;

        let mut tx = self.db.begin().await?;

        let link = self.core.issuer.issue(&mut *tx, ctx.user_id, type_id).await?;

        let record = self
            .repo
            .insert(
                &mut *tx,
                NewResource {
                    link_id: link.id,
                    owner: ctx.user_id,
                    organization_id: draft.organization_id,
                    is_enabled: draft.is_enabled,
                    detail: &draft.detail,
                    password_hash: password_hash.as_deref(),
                    actor: ctx.user_id,
                },
            )
            .await?;

        let backfill = LinkChanges {
            key: None,
            target_id: Some(record.raw_id()),
        };
        self.links
            .update_fields(&mut *tx, link.id, &backfill, ctx.user_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Link {} vanished before target backfill", link.id))
            })?;

        commit(tx).await?;

        info!(
            kind = %self.kind(),
            id = record.raw_id(),
            link_id = %link.id,
            key = %link.key,
            owner = %ctx.user_id,
            "Resource created"
        );

        Ok(record)
    }

    /// Load a resource by id, owner or system admin only.
    pub async fn get_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<R::Record> {
        let mut conn = self.db.acquire().await?;
        let record = self
            .repo
            .find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| self.not_found(id))?;
        ctx.require_access(record.owner_id())?;
        Ok(record)
    }

    /// Load the public view of a resource by its link key.
    ///
    /// The key is resolved again here; the link must be of this kind,
    /// backfilled, and the resource enabled, unexpired and unlocked by
    /// `password` when it has one.
    pub async fn get_by_key(&self, key: &str, password: Option<&str>) -> AppResult<R::Record> {
        let mut conn = self.db.acquire().await?;
        let link = self.core.resolver.resolve(&mut *conn, key).await?;
        if link.kind() != Some(self.kind()) || !link.has_target() {
            return Err(AppError::not_found("Link not found"));
        }

        let record = self
            .repo
            .find_by_id(&mut *conn, link.target_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        check_public_access(&link, &record, password, &self.hasher, Utc::now())?;
        Ok(record)
    }

    /// Replace the editable fields of a resource.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        update: ResourceUpdate<R::Detail>,
    ) -> AppResult<R::Record> {
        validate(&update.detail)?;
        let new_hash = match &update.password {
            PasswordChange::Set(password) => Some(self.hasher.hash_password(password)?),
            PasswordChange::Keep | PasswordChange::Clear => None,
        };

        let mut tx = self.db.begin().await?;

        let current = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| self.not_found(id))?;
        ctx.require_access(current.owner_id())?;

        let password_hash = match update.password {
            PasswordChange::Keep => current.password_hash().map(str::to_owned),
            PasswordChange::Clear => None,
            PasswordChange::Set(_) => new_hash,
        };

        let record = self
            .repo
            .update(
                &mut *tx,
                id,
                ResourceChanges {
                    is_enabled: update.is_enabled,
                    detail: &update.detail,
                    password_hash: password_hash.as_deref(),
                    actor: ctx.user_id,
                },
            )
            .await?
            .ok_or_else(|| self.not_found(id))?;

        commit(tx).await?;

        info!(kind = %self.kind(), id, actor = %ctx.user_id, "Resource updated");
        Ok(record)
    }

    /// Soft-delete a resource and then its link, in one transaction.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repo
            .find_by_id_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| self.not_found(id))?;
        ctx.require_access(current.owner_id())?;

        if !self.repo.soft_delete(&mut *tx, id, ctx.user_id).await? {
            return Err(self.not_found(id));
        }
        if !self
            .links
            .soft_delete(&mut *tx, current.link_id(), ctx.user_id)
            .await?
        {
            warn!(
                kind = %self.kind(),
                id,
                link_id = %current.link_id(),
                "Link was already deleted"
            );
        }

        commit(tx).await?;

        info!(
            kind = %self.kind(),
            id,
            key = %current.link_key(),
            actor = %ctx.user_id,
            "Resource deleted"
        );
        Ok(())
    }

    /// List the acting user's resources.
    pub async fn list_for_owner(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> AppResult<PageResponse<R::Record>> {
        let mut conn = self.db.acquire().await?;
        self.repo.list(&mut *conn, Some(ctx.user_id), query).await
    }

    /// List every user's resources. System admin only.
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> AppResult<PageResponse<R::Record>> {
        ctx.require_admin()?;
        let mut conn = self.db.acquire().await?;
        self.repo.list(&mut *conn, None, query).await
    }

    /// Count live resources owned by `owner`.
    pub async fn count_for_owner(&self, owner: UserId) -> AppResult<u64> {
        let mut conn = self.db.acquire().await?;
        self.repo.count(&mut *conn, Some(owner)).await
    }

    /// Count every live resource. System admin only.
    pub async fn count_all(&self, ctx: &RequestContext) -> AppResult<u64> {
        ctx.require_admin()?;
        let mut conn = self.db.acquire().await?;
        self.repo.count(&mut *conn, None).await
    }

    fn hash_optional(&self, password: Option<&str>) -> AppResult<Option<String>> {
        password
            .filter(|p| !p.is_empty())
            .map(|p| self.hasher.hash_password(p))
            .transpose()
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::not_found(format!("{} {id} not found", self.kind()))
    }
}
