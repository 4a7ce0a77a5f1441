//! Deterministic Suitter deployment for tests and local runs.
//!
//! Object ids are handed out from a counter, so two fixtures built with the
//! same calls contain the same ids. Content is shaped like fullnode output:
//! u64 values are decimal strings, optional images are vectors and tables
//! are `{ type, fields: { id: { id }, size } }`.

use std::collections::HashMap;

use serde_json::{Value, json};

use suitter_core::config::ChainConfig;
use suitter_core::domain::{Address, ObjectId};
use suitter_core::ports::{DynamicFieldName, LedgerObject};

use super::ledger::{InMemoryLedger, LedgerState};

const FIRST_ID: u64 = 0x1000;

struct PostSlot {
    wrapper: ObjectId,
    comments_table: ObjectId,
    comments: HashMap<u64, ObjectId>,
    next_comment: u64,
}

pub struct SuitterFixture {
    state: LedgerState,
    next_id: u64,
    package: ObjectId,
    manager: ObjectId,
    profiles: ObjectId,
    posts_table: ObjectId,
    posts: HashMap<ObjectId, PostSlot>,
}

impl Default for SuitterFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SuitterFixture {
    /// A published package with an empty Manager.
    pub fn new() -> Self {
        let mut fixture = Self {
            state: LedgerState::default(),
            next_id: FIRST_ID,
            package: ObjectId::zero(),
            manager: ObjectId::zero(),
            profiles: ObjectId::zero(),
            posts_table: ObjectId::zero(),
            posts: HashMap::new(),
        };
        fixture.package = fixture.alloc();
        fixture.manager = fixture.alloc();
        fixture.profiles = fixture.alloc();
        fixture.posts_table = fixture.alloc();

        let manager = LedgerObject {
            object_id: fixture.manager,
            version: 1,
            type_tag: Some(fixture.type_of("Manager")),
            fields: json!({
                "id": { "id": fixture.manager.to_hex() },
                "profiles": table(
                    format!("0x2::table::Table<address, {}>", fixture.type_of("Profile")),
                    fixture.profiles,
                ),
                "posts": table(
                    format!("0x2::table::Table<0x2::object::ID, {}>", fixture.type_of("Post")),
                    fixture.posts_table,
                ),
            }),
        };
        fixture.state.insert_object(manager);
        fixture
    }

    fn alloc(&mut self) -> ObjectId {
        let id = ObjectId::from_low_u64(self.next_id);
        self.next_id += 1;
        id
    }

    fn type_of(&self, name: &str) -> String {
        format!("{}::suitter::{name}", self.package)
    }

    pub fn package_id(&self) -> ObjectId {
        self.package
    }

    pub fn manager_id(&self) -> ObjectId {
        self.manager
    }

    pub fn config(&self) -> ChainConfig {
        ChainConfig::new(self.manager, self.package)
    }

    /// Register a profile for `owner`.
    pub fn profile(
        &mut self,
        owner: Address,
        username: &str,
        bio: &str,
        image_url: Option<&str>,
    ) -> &mut Self {
        let value = json!({
            "owner": owner.to_hex(),
            "username": username,
            "bio": bio,
            "image_url": vector(image_url),
        });
        self.entry(
            self.profiles,
            DynamicFieldName::address(&owner),
            "address",
            "Profile",
            value,
        );
        bump_size(&mut self.state, self.manager, "/profiles/fields/size");
        self
    }

    /// Store a profile whose `owner` field differs from its table key.
    pub fn misfiled_profile(&mut self, key: Address, owner: Address, username: &str) -> &mut Self {
        let value = json!({
            "owner": owner.to_hex(),
            "username": username,
            "bio": "",
            "image_url": [],
        });
        self.entry(
            self.profiles,
            DynamicFieldName::address(&key),
            "address",
            "Profile",
            value,
        );
        self
    }

    /// Publish a post and return its id.
    pub fn post(&mut self, author: Address, content: &str, image_url: Option<&str>) -> ObjectId {
        let post_id = self.alloc();
        let comments_table = self.alloc();
        let value = json!({
            "id": { "id": post_id.to_hex() },
            "author": author.to_hex(),
            "content": content,
            "like_count": "0",
            "image_url": vector(image_url),
            "comments": table(
                format!("0x2::table::Table<u64, {}>", self.type_of("Comment")),
                comments_table,
            ),
        });
        let wrapper = self.entry(
            self.posts_table,
            DynamicFieldName::object_id(&post_id),
            "0x2::object::ID",
            "Post",
            value,
        );
        self.posts.insert(
            post_id,
            PostSlot {
                wrapper,
                comments_table,
                comments: HashMap::new(),
                next_comment: 0,
            },
        );
        bump_size(&mut self.state, self.manager, "/posts/fields/size");
        post_id
    }

    /// Overwrite a post's like counter.
    pub fn set_like_count(&mut self, post_id: ObjectId, likes: u64) -> &mut Self {
        let count = self
            .posts
            .get(&post_id)
            .and_then(|slot| self.state.object_mut(&slot.wrapper))
            .and_then(|object| object.fields.pointer_mut("/value/fields/like_count"));
        if let Some(count) = count {
            *count = Value::String(likes.to_string());
        }
        self
    }

    /// Append a comment to `post_id` and return the comment id, or `None`
    /// if the post was not created by this fixture.
    pub fn comment(&mut self, post_id: ObjectId, author: Address, content: &str) -> Option<u64> {
        let slot = self.posts.get_mut(&post_id)?;
        let id = slot.next_comment;
        slot.next_comment += 1;
        let (table_id, wrapper) = (slot.comments_table, slot.wrapper);

        let value = json!({
            "id": id.to_string(),
            "author": author.to_hex(),
            "content": content,
        });
        let comment = self.entry(table_id, DynamicFieldName::u64(id), "u64", "Comment", value);
        if let Some(slot) = self.posts.get_mut(&post_id) {
            slot.comments.insert(id, comment);
        }
        bump_size(&mut self.state, wrapper, "/value/fields/comments/fields/size");
        Some(id)
    }

    /// Remove a comment, leaving later comment ids untouched.
    pub fn delete_comment(&mut self, post_id: ObjectId, comment_id: u64) -> &mut Self {
        if let Some(slot) = self.posts.get(&post_id) {
            self.state
                .detach_field(&slot.comments_table, &DynamicFieldName::u64(comment_id));
        }
        self
    }

    /// Make reads of the post's table entry fail.
    pub fn fail_post(&mut self, post_id: ObjectId) -> &mut Self {
        if let Some(slot) = self.posts.get(&post_id) {
            self.state.fail_object(slot.wrapper);
        }
        self
    }

    /// Make reads of one comment's table entry fail.
    pub fn fail_comment(&mut self, post_id: ObjectId, comment_id: u64) -> &mut Self {
        let wrapper = self
            .posts
            .get(&post_id)
            .and_then(|slot| slot.comments.get(&comment_id))
            .copied();
        if let Some(wrapper) = wrapper {
            self.state.fail_object(wrapper);
        }
        self
    }

    pub fn into_state(self) -> LedgerState {
        self.state
    }

    pub fn into_ledger(self) -> InMemoryLedger {
        InMemoryLedger::with_state(self.state)
    }

    /// Wrap `value` in a `0x2::dynamic_field::Field` object under `parent`.
    fn entry(
        &mut self,
        parent: ObjectId,
        name: DynamicFieldName,
        key_type: &str,
        value_type: &str,
        value: Value,
    ) -> ObjectId {
        let wrapper = self.alloc();
        let value_type = self.type_of(value_type);
        let object = LedgerObject {
            object_id: wrapper,
            version: 1,
            type_tag: Some(format!(
                "0x2::dynamic_field::Field<{key_type}, {value_type}>"
            )),
            fields: json!({
                "id": { "id": wrapper.to_hex() },
                "name": name.value.clone(),
                "value": { "type": value_type, "fields": value },
            }),
        };
        self.state.attach_field(parent, name, object);
        wrapper
    }
}

fn table(type_tag: String, id: ObjectId) -> Value {
    json!({
        "type": type_tag,
        "fields": { "id": { "id": id.to_hex() }, "size": "0" },
    })
}

fn vector(value: Option<&str>) -> Value {
    match value {
        Some(v) => json!([v]),
        None => json!([]),
    }
}

/// Increment a table's stored `size`. The read model never relies on it.
fn bump_size(state: &mut LedgerState, object: ObjectId, pointer: &str) {
    let Some(size) = state
        .object_mut(&object)
        .and_then(|o| o.fields.pointer_mut(pointer))
    else {
        return;
    };
    let next = size
        .as_str()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0)
        + 1;
    *size = Value::String(next.to_string());
}

#[cfg(test)]
mod tests {
    use suitter_core::ports::LedgerReader;

    use super::*;

    #[test]
    fn test_same_calls_give_same_ids() {
        let build = || {
            let mut fixture = SuitterFixture::new();
            let post = fixture.post(Address::from_low_u64(1), "gm", None);
            (fixture.manager_id(), post)
        };
        assert_eq!(build(), build());
    }

    #[tokio::test]
    async fn test_manager_shape() {
        let mut fixture = SuitterFixture::new();
        fixture.profile(Address::from_low_u64(1), "ann", "", None);
        let manager = fixture.manager_id();
        let ledger = fixture.into_ledger();

        let object = ledger.get_object(&manager).await.unwrap().unwrap();
        let tables = suitter_core::decode::manager_tables(&object.fields).unwrap();
        assert_eq!(object.fields["profiles"]["fields"]["size"], "1");
        assert_eq!(object.fields["posts"]["fields"]["size"], "0");

        let page = ledger
            .list_dynamic_fields(&tables.profiles, None, 50)
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name.type_tag, "address");
    }
}
