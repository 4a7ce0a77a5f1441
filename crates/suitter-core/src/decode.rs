//! Decoding of Move object content into domain records.
//!
//! Move structs arrive as JSON `fields` maps. Nested structs are
//! `{ "type": .., "fields": {..} }`, u64 values are decimal strings, and a
//! table is a struct whose `fields.id.id` is the table's object id.

use serde_json::Value;

use crate::domain::{Address, Comment, ManagerTables, ObjectId, Profile};
use crate::error::DecodeError;

/// A post's stored fields. The comment count is resolved separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub author: Address,
    pub content: String,
    pub like_count: u64,
    pub image_url: Option<String>,
    pub comments_table: ObjectId,
}

fn field<'a>(fields: &'a Value, name: &str) -> Result<&'a Value, DecodeError> {
    fields
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| DecodeError::MissingField(name.to_string()))
}

/// The `fields` map of a nested struct value.
fn struct_fields<'a>(value: &'a Value, name: &str) -> Result<&'a Value, DecodeError> {
    value
        .get("fields")
        .ok_or_else(|| DecodeError::MissingField(format!("{name}.fields")))
}

pub fn string_field(fields: &Value, name: &str) -> Result<String, DecodeError> {
    field(fields, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| DecodeError::InvalidType {
            field: name.to_string(),
            expected: "a string",
        })
}

pub fn u64_value(value: &Value, name: &str) -> Result<u64, DecodeError> {
    let invalid = || DecodeError::InvalidType {
        field: name.to_string(),
        expected: "a u64",
    };
    match value {
        Value::String(s) => s.parse().map_err(|_| invalid()),
        Value::Number(n) => n.as_u64().ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

pub fn u64_field(fields: &Value, name: &str) -> Result<u64, DecodeError> {
    u64_value(field(fields, name)?, name)
}

fn hex_field<T>(fields: &Value, name: &str) -> Result<T, DecodeError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    string_field(fields, name)?
        .parse()
        .map_err(|e: T::Err| DecodeError::InvalidId {
            field: name.to_string(),
            reason: e.to_string(),
        })
}

pub fn address_field(fields: &Value, name: &str) -> Result<Address, DecodeError> {
    hex_field(fields, name)
}

/// Collapse a zero-or-one element sequence into an optional scalar.
///
/// Accepts `[]` / `["x"]` (vector), `{ "vec": [..] }` (Move `Option`),
/// a bare string and `null`. An empty sequence yields `None`, never `""`.
pub fn optional_string(value: Option<&Value>, name: &str) -> Result<Option<String>, DecodeError> {
    let invalid = || DecodeError::InvalidType {
        field: name.to_string(),
        expected: "an optional string",
    };
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    let elements = match value {
        Value::String(s) => return Ok(Some(s.clone())),
        Value::Array(items) => items,
        Value::Object(map) => match map.get("vec") {
            Some(Value::Array(items)) => items,
            _ => match map.get("fields").and_then(|f| f.get("vec")) {
                Some(Value::Array(items)) => items,
                _ => return Err(invalid()),
            },
        },
        _ => return Err(invalid()),
    };

    match elements.as_slice() {
        [] => Ok(None),
        [Value::String(s)] => Ok(Some(s.clone())),
        _ => Err(invalid()),
    }
}

/// Object id of a table-valued field: `fields.<name>.fields.id.id`.
pub fn table_id(fields: &Value, name: &str) -> Result<ObjectId, DecodeError> {
    let table = struct_fields(field(fields, name)?, name)?;
    let uid = field(table, "id")?;
    // `UID` renders as `{ "id": "0x.." }`
    hex_field(uid, "id").map_err(|e| match e {
        DecodeError::MissingField(_) => DecodeError::MissingField(format!("{name}.fields.id.id")),
        other => other,
    })
}

/// The stored value of a dynamic field object: `fields.value.fields`.
pub fn field_value(object_fields: &Value) -> Result<&Value, DecodeError> {
    let value = field(object_fields, "value")?;
    struct_fields(value, "value")
}

pub fn manager_tables(manager_fields: &Value) -> Result<ManagerTables, DecodeError> {
    Ok(ManagerTables {
        profiles: table_id(manager_fields, "profiles")?,
        posts: table_id(manager_fields, "posts")?,
    })
}

pub fn profile(value: &Value) -> Result<Profile, DecodeError> {
    Ok(Profile {
        owner: address_field(value, "owner")?,
        username: string_field(value, "username")?,
        bio: string_field(value, "bio").or_else(|e| match e {
            DecodeError::MissingField(_) => Ok(String::new()),
            other => Err(other),
        })?,
        image_url: optional_string(value.get("image_url"), "image_url")?,
    })
}

pub fn post_record(value: &Value) -> Result<PostRecord, DecodeError> {
    Ok(PostRecord {
        author: address_field(value, "author")?,
        content: string_field(value, "content")?,
        like_count: u64_field(value, "like_count")?,
        image_url: optional_string(value.get("image_url"), "image_url")?,
        comments_table: table_id(value, "comments")?,
    })
}

/// Comments tolerate a missing author or content: they fall back to the
/// zero address and an empty body.
pub fn comment(value: &Value) -> Result<Comment, DecodeError> {
    let author = match value.get("author") {
        None | Some(Value::Null) => Address::zero(),
        Some(_) => address_field(value, "author")?,
    };
    let content = match value.get("content") {
        None | Some(Value::Null) => String::new(),
        Some(_) => string_field(value, "content")?,
    };
    Ok(Comment {
        id: u64_field(value, "id")?,
        author,
        content,
    })
}
