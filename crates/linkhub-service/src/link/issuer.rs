//! Link issuance: allocate a fresh, unique key inside the caller's transaction.

use std::sync::Arc;

use tracing::{error, info, warn};

use linkhub_core::config::LinkConfig;
use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::{LinkTypeId, UserId};
use linkhub_database::repositories::LinkStore;
use linkhub_entity::link::{Link, NewLink};

use super::generator::KeyGenerator;

/// Issues links with bounded retry on key collision.
///
/// The existence check only sees committed rows and rows written earlier in
/// the same transaction, so it cannot rule out a concurrent insert. The
/// store's unique constraint is the final arbiter: an insert that loses the
/// race comes back as `None` and is retried like any other collision.
pub struct LinkIssuer<S> {
    store: S,
    generator: Arc<dyn KeyGenerator>,
    key_length: usize,
    max_attempts: u32,
}

impl<S> std::fmt::Debug for LinkIssuer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkIssuer")
            .field("key_length", &self.key_length)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl<S: LinkStore> LinkIssuer<S> {
    /// Creates a new issuer.
    pub fn new(store: S, generator: Arc<dyn KeyGenerator>, config: &LinkConfig) -> Self {
        Self {
            store,
            generator,
            key_length: config.key_length,
            max_attempts: config.max_issue_attempts,
        }
    }

    /// Length of the keys this issuer produces.
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Issue a link with an unset target (`target_id = 0`).
    ///
    /// Runs entirely on `conn`; any error leaves the caller's transaction to
    /// roll back. Fails with `KeyExhausted` once every attempt collided.
    pub async fn issue(
        &self,
        conn: &mut S::Conn,
        creator: UserId,
        type_id: LinkTypeId,
    ) -> AppResult<Link> {
        for attempt in 1..=self.max_attempts {
            let key = self.generator.generate(self.key_length)?;

            if self.store.exists_by_key(conn, &key).await? {
                warn!(attempt, key = %key, "Link key collision, retrying");
                continue;
            }

            let new_link = NewLink {
                key,
                type_id,
                creator_user_id: creator,
            };
            match self.store.insert(conn, &new_link).await? {
                Some(link) => {
                    info!(
                        link_id = %link.id,
                        key = %link.key,
                        type_name = %link.type_name,
                        creator = %creator,
                        attempt,
                        "Link issued"
                    );
                    return Ok(link);
                }
                None => {
                    warn!(attempt, key = %new_link.key, "Link key collision on insert, retrying");
                }
            }
        }

        error!(
            attempts = self.max_attempts,
            key_length = self.key_length,
            creator = %creator,
            "Link key space exhausted"
        );
        Err(AppError::key_exhausted(format!(
            "No free link key found after {} attempts",
            self.max_attempts
        )))
    }
}
