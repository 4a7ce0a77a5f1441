//! Ledger read port - objects and their dynamic fields.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Address, ObjectId};
use crate::pagination::{Cursor, Page};

/// Key of a dynamic field: a Move type tag plus its JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub value: serde_json::Value,
}

impl DynamicFieldName {
    pub fn new(type_tag: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            type_tag: type_tag.into(),
            value,
        }
    }

    /// Key of a `Table<address, _>` entry.
    pub fn address(addr: &Address) -> Self {
        Self::new("address", serde_json::Value::String(addr.to_hex()))
    }

    /// Key of a `Table<ID, _>` entry.
    pub fn object_id(id: &ObjectId) -> Self {
        Self::new("0x2::object::ID", serde_json::Value::String(id.to_hex()))
    }

    /// Key of a `Table<u64, _>` entry. u64 values travel as decimal strings.
    pub fn u64(n: u64) -> Self {
        Self::new("u64", serde_json::Value::String(n.to_string()))
    }

    /// Key rendered for logs and failure reports.
    pub fn display_key(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// One entry of a dynamic-field listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFieldInfo {
    pub name: DynamicFieldName,
    /// Id of the field object wrapping the entry's value.
    pub object_id: ObjectId,
    pub object_type: Option<String>,
}

/// A ledger object with its Move content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerObject {
    pub object_id: ObjectId,
    pub version: u64,
    pub type_tag: Option<String>,
    /// The Move struct's `fields` map.
    pub fields: serde_json::Value,
}

/// Ledger read port.
///
/// Treats the ledger as a key-value store with table semantics:
/// parent id + key -> child object. An absent object is `Ok(None)`.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Fetch an object with its content.
    async fn get_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, LedgerError>;

    /// List one page of dynamic fields attached to `parent`.
    async fn list_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>, LedgerError>;

    /// Fetch the field object stored under `name` in `parent`.
    async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &DynamicFieldName,
    ) -> Result<Option<LedgerObject>, LedgerError>;
}

#[async_trait]
impl<T: LedgerReader + ?Sized> LedgerReader for Arc<T> {
    async fn get_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, LedgerError> {
        (**self).get_object(id).await
    }

    async fn list_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>, LedgerError> {
        (**self).list_dynamic_fields(parent, cursor, limit).await
    }

    async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &DynamicFieldName,
    ) -> Result<Option<LedgerObject>, LedgerError> {
        (**self).get_dynamic_field_object(parent, name).await
    }
}

/// Ledger access errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LedgerError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}
