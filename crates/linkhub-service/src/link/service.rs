//! Link-level operations outside issuance.

use tracing::warn;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::LinkId;
use linkhub_database::repositories::LinkStore;
use linkhub_entity::link::Link;

use crate::context::RequestContext;

/// Owner-facing operations on existing links.
#[derive(Debug, Clone)]
pub struct LinkService<S> {
    store: S,
}

impl<S: LinkStore> LinkService<S> {
    /// Creates a new link service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load a live link by id, owner or system admin only.
    pub async fn get_by_id(
        &self,
        conn: &mut S::Conn,
        ctx: &RequestContext,
        id: LinkId,
    ) -> AppResult<Link> {
        let link = self
            .store
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Link {id} not found")))?;
        ctx.require_access(link.creator_user_id)?;
        Ok(link)
    }

    /// Load a live link by key, whether or not its target is backfilled.
    pub async fn get_by_key(&self, conn: &mut S::Conn, key: &str) -> AppResult<Link> {
        self.store
            .find_by_key(conn, key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Link '{key}' not found")))
    }

    /// Request a new key for a link.
    ///
    /// Keys never change after issuance: any value other than the stored key
    /// fails with `KeyImmutable` and the stored key is left as it was.
    pub async fn change_key(
        &self,
        conn: &mut S::Conn,
        ctx: &RequestContext,
        id: LinkId,
        new_key: &str,
    ) -> AppResult<Link> {
        let link = self.get_by_id(conn, ctx, id).await?;
        if link.key == new_key {
            return Ok(link);
        }

        warn!(
            link_id = %id,
            key = %link.key,
            actor = %ctx.user_id,
            "Rejected attempt to change a link key"
        );
        Err(AppError::key_immutable("Link key cannot be changed"))
    }
}
