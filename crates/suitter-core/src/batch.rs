//! Partial-success results for table traversals.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::ports::LedgerError;

/// Why a single table entry was dropped from a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ItemFailureReason {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("entry listed but object is gone")]
    Missing,

    #[error("malformed entry: {0}")]
    Decode(String),

    #[error("owner {found} does not match key")]
    KeyMismatch { found: String },

    #[error("listing stopped: {0}")]
    PageListing(String),
}

impl From<LedgerError> for ItemFailureReason {
    fn from(err: LedgerError) -> Self {
        ItemFailureReason::Fetch(err.to_string())
    }
}

impl From<DecodeError> for ItemFailureReason {
    fn from(err: DecodeError) -> Self {
        ItemFailureReason::Decode(err.to_string())
    }
}

/// A table entry that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("entry {key}: {reason}")]
pub struct ItemFailure {
    pub key: String,
    pub reason: ItemFailureReason,
}

impl ItemFailure {
    pub fn new(key: impl Into<String>, reason: ItemFailureReason) -> Self {
        Self {
            key: key.into(),
            reason,
        }
    }
}

/// Items that were materialized plus the entries that were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult<T> {
    pub items: Vec<T>,
    pub failures: Vec<ItemFailure>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: Result<T, ItemFailure>) {
        match result {
            Ok(item) => self.items.push(item),
            Err(failure) => {
                tracing::warn!(key = %failure.key, reason = %failure.reason, "Dropping table entry");
                self.failures.push(failure);
            }
        }
    }

    /// True when no entry was dropped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keep only items matching `predicate`. Failures are kept.
    pub fn retain(&mut self, predicate: impl FnMut(&T) -> bool) {
        self.items.retain(predicate);
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }
}

impl<T> Extend<Result<T, ItemFailure>> for BatchResult<T> {
    fn extend<I: IntoIterator<Item = Result<T, ItemFailure>>>(&mut self, iter: I) {
        for result in iter {
            self.push(result);
        }
    }
}

impl<T> FromIterator<Result<T, ItemFailure>> for BatchResult<T> {
    fn from_iter<I: IntoIterator<Item = Result<T, ItemFailure>>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_splits_successes_and_failures() {
        let results = vec![
            Ok(1),
            Err(ItemFailure::new("0x2", ItemFailureReason::Missing)),
            Ok(3),
        ];
        let batch: BatchResult<i32> = results.into_iter().collect();

        assert_eq!(batch.items, vec![1, 3]);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].key, "0x2");
        assert!(!batch.is_complete());
    }

    #[test]
    fn test_retain_keeps_failures() {
        let mut batch: BatchResult<i32> = vec![
            Ok(1),
            Ok(2),
            Err(ItemFailure::new("k", ItemFailureReason::Decode("bad".into()))),
        ]
        .into_iter()
        .collect();
        batch.retain(|n| n % 2 == 0);

        assert_eq!(batch.items, vec![2]);
        assert_eq!(batch.failures.len(), 1);
    }

    #[test]
    fn test_failure_serializes_with_kind_tag() {
        let failure = ItemFailure::new(
            "0xabc",
            ItemFailureReason::KeyMismatch {
                found: "0xdef".into(),
            },
        );
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["reason"]["kind"], "key_mismatch");
        assert_eq!(json["reason"]["detail"]["found"], "0xdef");
    }
}
