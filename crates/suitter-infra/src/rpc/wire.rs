//! Fullnode JSON-RPC response shapes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use suitter_core::domain::ObjectId;
use suitter_core::pagination::{Cursor, Page};
use suitter_core::ports::{DynamicFieldInfo, DynamicFieldName, LedgerError, LedgerObject};

/// Object error codes meaning "no such object".
const ABSENT_CODES: [&str; 3] = ["notExists", "dynamicFieldNotFound", "deleted"];

/// JSON-RPC 2.0 envelope.
#[derive(Debug, Deserialize)]
pub struct RpcEnvelope<R> {
    pub result: Option<R>,
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

impl RpcErrorBody {
    /// Fullnodes report some missing lookups as a server error rather than an
    /// object error.
    pub fn is_absent(&self) -> bool {
        self.code == -32000
            && (self.message.contains("does not exist")
                || self.message.contains("DynamicFieldDoesNotExist"))
    }
}

impl<R> RpcEnvelope<R> {
    pub fn into_result(self) -> Result<R, LedgerError> {
        if let Some(error) = self.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| LedgerError::Decode("response has neither result nor error".into()))
    }
}

/// `sui_getObject` / `suix_getDynamicFieldObject` result.
#[derive(Debug, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<ObjectError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub version: u64,
    #[serde(rename = "type")]
    pub type_tag: Option<String>,
    pub content: Option<ObjectContent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum ObjectContent {
    MoveObject {
        #[serde(rename = "type")]
        type_tag: String,
        fields: Value,
    },
    #[serde(other)]
    Package,
}

#[derive(Debug, Deserialize)]
pub struct ObjectError {
    pub code: String,
    #[serde(default)]
    pub object_id: Option<String>,
}

impl ObjectResponse {
    /// `Ok(None)` for an absent object; content-less objects get null fields.
    pub fn into_object(self) -> Result<Option<LedgerObject>, LedgerError> {
        if let Some(error) = self.error {
            if ABSENT_CODES.contains(&error.code.as_str()) {
                return Ok(None);
            }
            return Err(LedgerError::Decode(format!(
                "object {} error: {}",
                error.object_id.as_deref().unwrap_or("?"),
                error.code
            )));
        }

        let Some(data) = self.data else {
            return Ok(None);
        };

        let (type_tag, fields) = match data.content {
            Some(ObjectContent::MoveObject { type_tag, fields }) => (Some(type_tag), fields),
            Some(ObjectContent::Package) | None => (data.type_tag, Value::Null),
        };

        Ok(Some(LedgerObject {
            object_id: data.object_id,
            version: data.version,
            type_tag,
            fields,
        }))
    }
}

/// `suix_getDynamicFields` result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldPage {
    pub data: Vec<DynamicFieldEntry>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldEntry {
    pub name: DynamicFieldName,
    pub object_id: ObjectId,
    pub object_type: Option<String>,
}

impl From<DynamicFieldPage> for Page<DynamicFieldInfo> {
    fn from(page: DynamicFieldPage) -> Self {
        Page {
            data: page
                .data
                .into_iter()
                .map(|entry| DynamicFieldInfo {
                    name: entry.name,
                    object_id: entry.object_id,
                    object_type: entry.object_type,
                })
                .collect(),
            next_cursor: page.next_cursor.map(Cursor),
            has_next_page: page.has_next_page,
        }
    }
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_move_object_response() {
        let response: ObjectResponse = serde_json::from_value(json!({
            "data": {
                "objectId": "0x5",
                "version": "12",
                "digest": "9xyz",
                "type": "0x9::suitter::Manager",
                "content": {
                    "dataType": "moveObject",
                    "type": "0x9::suitter::Manager",
                    "hasPublicTransfer": false,
                    "fields": { "id": { "id": "0x5" } }
                }
            }
        }))
        .unwrap();

        let object = response.into_object().unwrap().unwrap();
        assert_eq!(object.object_id, ObjectId::from_low_u64(5));
        assert_eq!(object.version, 12);
        assert_eq!(object.type_tag.as_deref(), Some("0x9::suitter::Manager"));
        assert_eq!(object.fields["id"]["id"], "0x5");
    }

    #[test]
    fn test_absent_object_codes() {
        for code in ABSENT_CODES {
            let response: ObjectResponse = serde_json::from_value(json!({
                "error": { "code": code, "object_id": "0x5" }
            }))
            .unwrap();
            assert!(response.into_object().unwrap().is_none());
        }

        let response: ObjectResponse =
            serde_json::from_value(json!({ "error": { "code": "displayError" } })).unwrap();
        assert!(matches!(response.into_object(), Err(LedgerError::Decode(_))));
    }

    #[test]
    fn test_package_content_has_no_fields() {
        let response: ObjectResponse = serde_json::from_value(json!({
            "data": {
                "objectId": "0x9",
                "version": 1,
                "type": "package",
                "content": { "dataType": "package", "disassembled": {} }
            }
        }))
        .unwrap();
        let object = response.into_object().unwrap().unwrap();
        assert!(object.fields.is_null());
    }

    #[test]
    fn test_dynamic_field_page() {
        let page: DynamicFieldPage = serde_json::from_value(json!({
            "data": [{
                "name": { "type": "address", "value": "0x1" },
                "bcsName": "abc",
                "type": "DynamicField",
                "objectType": "0x9::suitter::Profile",
                "objectId": "0x77",
                "version": 3,
                "digest": "d"
            }],
            "nextCursor": "0x77",
            "hasNextPage": true
        }))
        .unwrap();

        let page: Page<DynamicFieldInfo> = page.into();
        assert_eq!(page.data[0].name.type_tag, "address");
        assert_eq!(page.data[0].object_id, ObjectId::from_low_u64(0x77));
        assert_eq!(page.next_cursor, Some(Cursor("0x77".into())));
        assert!(page.has_next_page);
    }

    #[test]
    fn test_envelope_errors() {
        let envelope: RpcEnvelope<Value> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "Object 0x5 does not exist" }
        }))
        .unwrap();
        assert!(envelope.error.as_ref().unwrap().is_absent());
        assert!(matches!(
            envelope.into_result(),
            Err(LedgerError::Rpc { code: -32000, .. })
        ));

        let envelope: RpcEnvelope<Value> =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 1 })).unwrap();
        assert!(matches!(envelope.into_result(), Err(LedgerError::Decode(_))));
    }
}
