//! # Suitter Shared
//!
//! Types exchanged between the API server and its front-ends.
//! Identifiers travel as `0x`-prefixed hex strings.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
