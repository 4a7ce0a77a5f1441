//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// A post as shown in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    /// `0x1234...abcd`, used when the author has no profile.
    pub author_short: String,
    pub content: String,
    pub like_count: u64,
    pub image_url: Option<String>,
    pub comments_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: u64,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub owner: String,
    pub username: String,
    pub bio: String,
    pub image_url: Option<String>,
}

/// Result of a profile lookup. `has_profile: false` is a normal answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStatusResponse {
    pub has_profile: bool,
    pub profile: Option<ProfileResponse>,
}

/// A table entry that was skipped while building a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub key: String,
    pub kind: String,
    pub reason: String,
}

/// A listing plus the entries that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub failures: Vec<FailureResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: ListResponse<CommentResponse>,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostsQuery {
    pub author: Option<String>,
}

/// Request to build a `create_profile` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub bio: String,
    pub image_url: Option<String>,
}

/// Request to build a `create_post` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub image_url: Option<String>,
}

/// Request to build a `like_post` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikePostRequest {
    pub post_id: String,
}

/// Request to build an `add_comment` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub post_id: String,
    pub content: String,
}

/// Request to build an `edit_comment` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditCommentRequest {
    pub post_id: String,
    pub comment_id: u64,
    pub content: String,
}

/// Request to build a `delete_comment` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommentRequest {
    pub post_id: String,
    pub comment_id: u64,
}

/// One move-call argument, tagged with its Move kind. Ids are hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArgResponse {
    Object(String),
    String(String),
    Address(String),
    U64(u64),
    StringVector(Vec<String>),
}

/// An unsigned move call for the wallet to sign and submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCallResponse {
    /// `<package>::<module>::<function>`
    pub target: String,
    pub package: String,
    pub module: String,
    pub function: String,
    pub arguments: Vec<CallArgResponse>,
    /// How long to wait after submission before re-reading.
    pub settle_delay_ms: u64,
}
