//! Ledger write port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::write::MoveCall;

/// Digest of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxDigest(pub String);

/// Signs and submits move calls. Submission is fire-and-forget: no
/// confirmation polling happens after the digest is returned.
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
    async fn execute(&self, call: &MoveCall) -> Result<TxDigest, TransactionError>;
}

/// Transaction submission errors, surfaced to the user verbatim.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransactionError {
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Transaction transport failed: {0}")]
    Transport(String),
}
