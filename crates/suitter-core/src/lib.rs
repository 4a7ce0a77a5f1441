//! # Suitter Core
//!
//! The read-model layer of Suitter.
//! Rebuilds profiles, posts and comments from the ledger's object graph and
//! constructs the move calls of the write path. All I/O goes through ports.

pub mod batch;
pub mod config;
pub mod decode;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod read_model;
pub mod view;
pub mod write;

pub use batch::{BatchResult, ItemFailure, ItemFailureReason};
pub use config::ChainConfig;
pub use error::{DecodeError, DomainError, ReadError};
pub use read_model::{PostFilter, ReadModelBuilder};
pub use view::{Ticket, ViewSlot};
pub use write::{CallArg, EntryPoint, MoveCall, TransactionBuilder};
