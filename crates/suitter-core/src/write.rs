//! Write-path construction.
//!
//! Builds move calls against the fixed entry points of the `suitter`
//! package. Signing and submission happen elsewhere (the user's wallet or a
//! [`TransactionExecutor`](crate::ports::TransactionExecutor)).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ChainConfig;
use crate::domain::{Address, ObjectId};
use crate::error::DomainError;

/// Move module holding every entry point.
pub const MODULE: &str = "suitter";

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 280;

/// Entry points of the `suitter` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    CreateProfile,
    CreatePost,
    LikePost,
    AddComment,
    EditComment,
    DeleteComment,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 6] = [
        EntryPoint::CreateProfile,
        EntryPoint::CreatePost,
        EntryPoint::LikePost,
        EntryPoint::AddComment,
        EntryPoint::EditComment,
        EntryPoint::DeleteComment,
    ];

    pub fn function(&self) -> &'static str {
        match self {
            EntryPoint::CreateProfile => "create_profile",
            EntryPoint::CreatePost => "create_post",
            EntryPoint::LikePost => "like_post",
            EntryPoint::AddComment => "add_comment",
            EntryPoint::EditComment => "edit_comment",
            EntryPoint::DeleteComment => "delete_comment",
        }
    }

    /// Fixed wait after a successful submission before the ledger is re-read.
    /// There is no confirmation polling.
    pub fn settle_delay(&self) -> Duration {
        match self {
            EntryPoint::CreateProfile => Duration::from_millis(3000),
            EntryPoint::LikePost => Duration::from_millis(1500),
            EntryPoint::CreatePost
            | EntryPoint::AddComment
            | EntryPoint::EditComment
            | EntryPoint::DeleteComment => Duration::from_millis(2000),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function())
    }
}

impl FromStr for EntryPoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entry| entry.function() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown entry point `{s}`")))
    }
}

/// Typed argument of a move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    /// Shared or owned object input.
    Object(ObjectId),
    String(String),
    Address(Address),
    U64(u64),
    /// `vector<String>`; used with zero or one element for optional values.
    StringVector(Vec<String>),
}

/// A single move call, ready to be wrapped in a transaction and signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub entry_point: EntryPoint,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    /// `<package>::suitter::<function>`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.entry_point.function())
    }

    pub fn settle_delay(&self) -> Duration {
        self.entry_point.settle_delay()
    }
}

/// Builds validated move calls for one deployment.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    package: ObjectId,
    manager: ObjectId,
}

impl TransactionBuilder {
    pub fn new(package: ObjectId, manager: ObjectId) -> Self {
        Self { package, manager }
    }

    /// Fails with `NotConfigured` if either id is missing.
    pub fn from_config(config: &ChainConfig) -> Result<Self, DomainError> {
        let (package, manager) = config.write_targets()?;
        Ok(Self::new(package, manager))
    }

    fn call(&self, entry_point: EntryPoint, mut args: Vec<CallArg>) -> MoveCall {
        args.insert(0, CallArg::Object(self.manager));
        MoveCall {
            package: self.package,
            module: MODULE.to_string(),
            entry_point,
            arguments: args,
        }
    }

    pub fn create_profile(
        &self,
        username: &str,
        bio: &str,
        image_url: Option<&str>,
    ) -> Result<MoveCall, DomainError> {
        let username = required(username, "Username is required")?;
        Ok(self.call(
            EntryPoint::CreateProfile,
            vec![
                CallArg::String(username),
                CallArg::String(bio.trim().to_string()),
                optional_vector(image_url),
            ],
        ))
    }

    pub fn create_post(&self, content: &str, image_url: Option<&str>) -> Result<MoveCall, DomainError> {
        let content = required(content, "Post content cannot be empty")?;
        Ok(self.call(
            EntryPoint::CreatePost,
            vec![CallArg::String(content), optional_vector(image_url)],
        ))
    }

    pub fn like_post(&self, post_id: ObjectId) -> MoveCall {
        self.call(EntryPoint::LikePost, vec![CallArg::Address(post_id.into())])
    }

    pub fn add_comment(&self, post_id: ObjectId, content: &str) -> Result<MoveCall, DomainError> {
        let content = comment_body(content)?;
        Ok(self.call(
            EntryPoint::AddComment,
            vec![CallArg::Address(post_id.into()), CallArg::String(content)],
        ))
    }

    pub fn edit_comment(
        &self,
        post_id: ObjectId,
        comment_id: u64,
        content: &str,
    ) -> Result<MoveCall, DomainError> {
        let content = comment_body(content)?;
        Ok(self.call(
            EntryPoint::EditComment,
            vec![
                CallArg::Address(post_id.into()),
                CallArg::U64(comment_id),
                CallArg::String(content),
            ],
        ))
    }

    pub fn delete_comment(&self, post_id: ObjectId, comment_id: u64) -> MoveCall {
        self.call(
            EntryPoint::DeleteComment,
            vec![CallArg::Address(post_id.into()), CallArg::U64(comment_id)],
        )
    }
}

fn required(value: &str, message: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn comment_body(content: &str) -> Result<String, DomainError> {
    let trimmed = required(content, "Comment cannot be empty")?;
    // Length is checked on the text as typed.
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(DomainError::Validation(format!(
            "Comment too long (max {MAX_COMMENT_CHARS} characters)"
        )));
    }
    Ok(trimmed)
}

fn optional_vector(value: Option<&str>) -> CallArg {
    let items = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| vec![v.to_string()])
        .unwrap_or_default();
    CallArg::StringVector(items)
}
