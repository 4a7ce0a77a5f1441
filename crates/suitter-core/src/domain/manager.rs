use serde::{Deserialize, Serialize};

use super::ObjectId;

/// Table ids owned by the root Manager object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerTables {
    /// address -> Profile
    pub profiles: ObjectId,
    /// post id -> Post
    pub posts: ObjectId,
}
