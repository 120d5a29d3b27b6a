//! Link kind to `link_types.id` mapping.

use std::collections::HashMap;

use tracing::warn;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::LinkTypeId;
use linkhub_database::DatabasePool;
use linkhub_database::repositories::LinkTypeRepository;
use linkhub_entity::link::{LinkKind, LinkTypeRecord};

/// The seeded link types, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LinkTypeRegistry {
    ids: HashMap<LinkKind, LinkTypeId>,
}

impl LinkTypeRegistry {
    /// Build the registry from `link_types` rows. Unknown names are skipped.
    pub fn from_records(records: &[LinkTypeRecord]) -> Self {
        let mut ids = HashMap::new();
        for record in records {
            match record.name.parse::<LinkKind>() {
                Ok(kind) => {
                    ids.insert(kind, record.id);
                }
                Err(_) => warn!(name = %record.name, "Ignoring unsupported link type"),
            }
        }
        Self { ids }
    }

    /// Load the registry from the database.
    pub async fn load(db: &DatabasePool) -> AppResult<Self> {
        let mut conn = db.acquire().await?;
        let records = LinkTypeRepository::new().find_all(&mut *conn).await?;
        let registry = Self::from_records(&records);
        if let Some(missing) = LinkKind::ALL.iter().find(|k| !registry.ids.contains_key(k)) {
            return Err(AppError::configuration(format!(
                "Link type {missing} is not seeded; run `linkhub seed`"
            )));
        }
        Ok(registry)
    }

    /// The `link_types.id` for `kind`.
    pub fn type_id(&self, kind: LinkKind) -> AppResult<LinkTypeId> {
        self.ids
            .get(&kind)
            .copied()
            .ok_or_else(|| AppError::configuration(format!("Link type {kind} is not registered")))
    }
}
