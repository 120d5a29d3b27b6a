//! Link resolution: inbound key to live link.

use tracing::debug;

use linkhub_core::config::LinkConfig;
use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_database::repositories::LinkStore;
use linkhub_entity::link::{Link, LinkTarget, is_key_charset};

/// Resolves public keys to links.
#[derive(Debug, Clone)]
pub struct LinkResolver<S> {
    store: S,
    config: LinkConfig,
}

impl<S: LinkStore> LinkResolver<S> {
    /// Creates a new resolver.
    pub fn new(store: S, config: LinkConfig) -> Self {
        Self { store, config }
    }

    /// Whether `key` has an accepted length and only alphabet characters.
    ///
    /// Keys issued under an earlier length setting keep resolving as long as
    /// that length is listed in `links.legacy_key_lengths`.
    pub fn is_well_formed(&self, key: &str) -> bool {
        self.config.accepts_length(key.len()) && is_key_charset(key)
    }

    /// Load the live link for `key`, joined with its type name.
    ///
    /// Malformed keys are rejected before any store access. Unknown and
    /// soft-deleted keys are `NotFound`.
    pub async fn resolve(&self, conn: &mut S::Conn, key: &str) -> AppResult<Link> {
        if !self.is_well_formed(key) {
            debug!(key_length = key.len(), "Rejected malformed link key");
            return Err(not_found());
        }

        self.store
            .find_by_key(conn, key)
            .await?
            .ok_or_else(not_found)
    }

    /// Resolve `key` to its typed target.
    ///
    /// A link whose target is not backfilled yet, or whose type this build
    /// does not know, is `NotFound`.
    pub async fn resolve_target(&self, conn: &mut S::Conn, key: &str) -> AppResult<LinkTarget> {
        let link = self.resolve(conn, key).await?;
        link.target().ok_or_else(|| {
            debug!(
                link_id = %link.id,
                type_name = %link.type_name,
                target_id = link.target_id,
                "Link has no usable target"
            );
            not_found()
        })
    }
}

fn not_found() -> AppError {
    AppError::not_found("Link not found")
}
