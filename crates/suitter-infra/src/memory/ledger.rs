//! In-memory ledger - used by tests and local development when no fullnode
//! is reachable.
//!
//! Objects live in a map and dynamic fields are kept per parent in
//! insertion order, which is also their listing order. Individual objects
//! can be marked as failing to exercise partial-result handling.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use suitter_core::domain::ObjectId;
use suitter_core::pagination::{Cursor, Page};
use suitter_core::ports::{
    DynamicFieldInfo, DynamicFieldName, LedgerError, LedgerObject, LedgerReader,
};

#[derive(Debug, Clone)]
struct FieldEntry {
    name: DynamicFieldName,
    object_id: ObjectId,
    object_type: Option<String>,
}

/// Plain ledger contents, mutated synchronously by fixtures.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    objects: HashMap<ObjectId, LedgerObject>,
    fields: HashMap<ObjectId, Vec<FieldEntry>>,
    failing: HashSet<ObjectId>,
}

impl LedgerState {
    pub fn insert_object(&mut self, object: LedgerObject) {
        self.objects.insert(object.object_id, object);
    }

    pub fn object_mut(&mut self, id: &ObjectId) -> Option<&mut LedgerObject> {
        self.objects.get_mut(id)
    }

    /// Store `object` under `name` in `parent`, replacing an entry with the
    /// same name.
    pub fn attach_field(&mut self, parent: ObjectId, name: DynamicFieldName, object: LedgerObject) {
        let entry = FieldEntry {
            name,
            object_id: object.object_id,
            object_type: object.type_tag.clone(),
        };
        let entries = self.fields.entry(parent).or_default();
        match entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                self.objects.remove(&existing.object_id);
                *existing = entry;
            }
            None => entries.push(entry),
        }
        self.insert_object(object);
    }

    /// Remove the entry stored under `name`. Returns whether it existed.
    pub fn detach_field(&mut self, parent: &ObjectId, name: &DynamicFieldName) -> bool {
        let Some(entries) = self.fields.get_mut(parent) else {
            return false;
        };
        match entries.iter().position(|e| &e.name == name) {
            Some(index) => {
                let entry = entries.remove(index);
                self.objects.remove(&entry.object_id);
                true
            }
            None => false,
        }
    }

    /// Make every read of `id` fail with a transport error.
    pub fn fail_object(&mut self, id: ObjectId) {
        self.failing.insert(id);
    }

    fn read(&self, id: &ObjectId) -> Result<Option<LedgerObject>, LedgerError> {
        if self.failing.contains(id) {
            return Err(LedgerError::Transport(format!("injected failure reading {id}")));
        }
        Ok(self.objects.get(id).cloned())
    }
}

/// In-memory ledger behind an async RwLock.
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::with_state(LedgerState::default())
    }

    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn attach_field(&self, parent: ObjectId, name: DynamicFieldName, object: LedgerObject) {
        self.state.write().await.attach_field(parent, name, object);
    }

    pub async fn detach_field(&self, parent: &ObjectId, name: &DynamicFieldName) -> bool {
        self.state.write().await.detach_field(parent, name)
    }

    pub async fn fail_object(&self, id: ObjectId) {
        self.state.write().await.fail_object(id);
    }

    /// Swap in new contents wholesale.
    pub async fn replace_state(&self, state: LedgerState) {
        *self.state.write().await = state;
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn get_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, LedgerError> {
        self.state.read().await.read(id)
    }

    async fn list_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>, LedgerError> {
        let state = self.state.read().await;
        if state.failing.contains(parent) {
            return Err(LedgerError::Transport(format!(
                "injected failure listing {parent}"
            )));
        }

        let entries = state.fields.get(parent).map(Vec::as_slice).unwrap_or(&[]);

        // The cursor is the object id of the last entry already returned.
        let start = match cursor {
            None => 0,
            Some(cursor) => {
                let after: ObjectId = cursor.as_str().parse().map_err(|_| LedgerError::Rpc {
                    code: -32602,
                    message: format!("invalid cursor {}", cursor.as_str()),
                })?;
                entries
                    .iter()
                    .position(|e| e.object_id == after)
                    .map(|i| i + 1)
                    .ok_or_else(|| LedgerError::Rpc {
                        code: -32602,
                        message: format!("cursor {} not found", cursor.as_str()),
                    })?
            }
        };

        let end = (start + limit.max(1)).min(entries.len());
        let data: Vec<DynamicFieldInfo> = entries[start.min(end)..end]
            .iter()
            .map(|e| DynamicFieldInfo {
                name: e.name.clone(),
                object_id: e.object_id,
                object_type: e.object_type.clone(),
            })
            .collect();

        let has_next_page = end < entries.len();
        let next_cursor = data.last().map(|e| Cursor(e.object_id.to_hex()));

        Ok(Page {
            data,
            next_cursor,
            has_next_page,
        })
    }

    async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &DynamicFieldName,
    ) -> Result<Option<LedgerObject>, LedgerError> {
        let state = self.state.read().await;
        let entry = state
            .fields
            .get(parent)
            .and_then(|entries| entries.iter().find(|e| &e.name == name));

        match entry {
            Some(entry) => state.read(&entry.object_id),
            None => Ok(None),
        }
    }
}
