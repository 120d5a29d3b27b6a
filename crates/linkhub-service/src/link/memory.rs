//! In-memory [`LinkStore`] and scripted [`KeyGenerator`] used by unit tests.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::{LinkId, LinkTypeId, UserId};
use linkhub_database::repositories::{LinkChanges, LinkStore};
use linkhub_entity::audit::AuditStamp;
use linkhub_entity::link::{Link, LinkKind, NewLink};

use super::generator::KeyGenerator;

#[derive(Debug, Default)]
struct State {
    rows: Vec<(Link, bool)>,
    /// Keys committed by "another transaction": invisible to the existence
    /// check, but rejected at insert.
    racing: HashSet<String>,
    inserts: usize,
    calls: usize,
}

/// Link store keeping rows in a vector. Clones share state.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryLinkStore {
    state: Arc<Mutex<State>>,
}

impl MemoryLinkStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a live link holding `key`.
    pub(crate) fn with_key(self, key: &str) -> Self {
        {
            let mut state = self.state.lock().expect("state");
            let id = state.rows.len() as i64 + 1;
            state.rows.push((link(id, key, LinkKind::Card, UserId(1)), false));
        }
        self
    }

    /// Make `key` collide only at insert time.
    pub(crate) fn with_racing_key(self, key: &str) -> Self {
        self.state.lock().expect("state").racing.insert(key.to_string());
        self
    }

    pub(crate) fn inserts(&self) -> usize {
        self.state.lock().expect("state").inserts
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().expect("state").calls
    }

    pub(crate) fn stored_key(&self, id: LinkId) -> Option<String> {
        let state = self.state.lock().expect("state");
        state
            .rows
            .iter()
            .find(|(l, _)| l.id == id)
            .map(|(l, _)| l.key.clone())
    }
}

pub(crate) fn type_id_for(kind: LinkKind) -> LinkTypeId {
    let index = LinkKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
    LinkTypeId(index as i64 + 1)
}

fn kind_for(type_id: LinkTypeId) -> LinkKind {
    LinkKind::ALL[(type_id.0 - 1) as usize]
}

fn link(id: i64, key: &str, kind: LinkKind, owner: UserId) -> Link {
    let now = Utc::now();
    Link {
        id: LinkId(id),
        key: key.to_string(),
        type_id: type_id_for(kind),
        type_name: kind.as_str().to_string(),
        target_id: 0,
        creator_user_id: owner,
        audit: AuditStamp {
            created_at: now,
            updated_at: now,
            created_by: Some(owner),
            updated_by: Some(owner),
        },
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    type Conn = ();

    async fn insert(&self, _conn: &mut (), new: &NewLink) -> AppResult<Option<Link>> {
        let mut state = self.state.lock().expect("state");
        state.calls += 1;
        if state.racing.remove(&new.key) || state.rows.iter().any(|(l, _)| l.key == new.key) {
            return Ok(None);
        }
        state.inserts += 1;
        let id = state.rows.len() as i64 + 1;
        let row = link(id, &new.key, kind_for(new.type_id), new.creator_user_id);
        state.rows.push((row.clone(), false));
        Ok(Some(row))
    }

    async fn find_by_id(&self, _conn: &mut (), id: LinkId) -> AppResult<Option<Link>> {
        let mut state = self.state.lock().expect("state");
        state.calls += 1;
        Ok(state
            .rows
            .iter()
            .find(|(l, deleted)| l.id == id && !deleted)
            .map(|(l, _)| l.clone()))
    }

    async fn find_by_key(&self, _conn: &mut (), key: &str) -> AppResult<Option<Link>> {
        let mut state = self.state.lock().expect("state");
        state.calls += 1;
        Ok(state
            .rows
            .iter()
            .find(|(l, deleted)| l.key == key && !deleted)
            .map(|(l, _)| l.clone()))
    }

    async fn exists_by_key(&self, _conn: &mut (), key: &str) -> AppResult<bool> {
        let mut state = self.state.lock().expect("state");
        state.calls += 1;
        Ok(state.rows.iter().any(|(l, _)| l.key == key))
    }

    async fn update_fields(
        &self,
        _conn: &mut (),
        id: LinkId,
        changes: &LinkChanges,
        actor: UserId,
    ) -> AppResult<Option<Link>> {
        let mut state = self.state.lock().expect("state");
        state.calls += 1;
        let Some((row, _)) = state.rows.iter_mut().find(|(l, deleted)| l.id == id && !deleted)
        else {
            return Ok(None);
        };
        if changes.key.as_deref().is_some_and(|k| k != row.key) {
            return Err(AppError::key_immutable("Link key cannot be changed"));
        }
        if let Some(target_id) = changes.target_id {
            row.target_id = target_id;
        }
        row.audit.updated_by = Some(actor);
        row.audit.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn soft_delete(&self, _conn: &mut (), id: LinkId, _actor: UserId) -> AppResult<bool> {
        let mut state = self.state.lock().expect("state");
        state.calls += 1;
        match state.rows.iter_mut().find(|(l, deleted)| l.id == id && !deleted) {
            Some((_, deleted)) => {
                *deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Hands out pre-set keys in order.
#[derive(Debug, Default)]
pub(crate) struct ScriptedGenerator {
    keys: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub(crate) fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Mutex::new(keys.into_iter().map(Into::into).collect()),
        }
    }
}

impl KeyGenerator for ScriptedGenerator {
    fn generate(&self, _length: usize) -> AppResult<String> {
        self.keys
            .lock()
            .expect("keys")
            .pop_front()
            .ok_or_else(|| AppError::internal("Scripted generator ran out of keys"))
    }
}
