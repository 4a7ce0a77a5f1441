use serde::{Deserialize, Serialize};

use super::{Address, Comment, ObjectId};
use crate::batch::BatchResult;

/// Post as shown in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: ObjectId,
    pub author: Address,
    pub content: String,
    pub like_count: u64,
    pub image_url: Option<String>,
    /// Live cardinality of the post's comments table.
    pub comments_count: usize,
}

/// Post together with its fully materialized comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: BatchResult<Comment>,
}
