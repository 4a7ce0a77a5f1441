use serde::{Deserialize, Serialize};

use super::Address;

/// Comment on a post. Ids are assigned monotonically per post and may have
/// gaps after deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: Address,
    pub content: String,
}
