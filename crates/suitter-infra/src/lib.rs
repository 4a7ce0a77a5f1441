//! # Suitter Infrastructure
//!
//! Concrete implementations of the ports defined in `suitter-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network dependencies, in-memory ledger only
//! - `rpc` - Sui JSON-RPC ledger client via reqwest

pub mod executor;
pub mod memory;
pub mod session;

#[cfg(feature = "rpc")]
pub mod rpc;

#[cfg(test)]
mod tests;

// Re-exports - Always available
pub use executor::SettlingExecutor;
pub use memory::{InMemoryLedger, SuitterFixture};
pub use session::{FeedSession, SessionError};

// Re-exports - RPC
#[cfg(feature = "rpc")]
pub use rpc::{SuiNetwork, SuiRpcClient, SuiRpcConfig};
