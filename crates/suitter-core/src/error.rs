//! Domain-level error types.

use thiserror::Error;

use crate::ports::LedgerError;

/// Domain errors - configuration and input validation failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not configured: {0} is not set")]
    NotConfigured(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Read-model errors.
///
/// Only a missing configuration or an unreachable root object ever surface
/// from a traversal. Per-entry failures are collected in a `BatchResult`.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Not configured: {0} is not set")]
    NotConfigured(&'static str),

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Ledger unreachable: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Malformed object: {0}")]
    Decode(#[from] DecodeError),
}

impl ReadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadError::NotFound { .. })
    }
}

/// Move object content did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}` is not {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("field `{field}` holds an invalid identifier: {reason}")]
    InvalidId { field: String, reason: String },
}
