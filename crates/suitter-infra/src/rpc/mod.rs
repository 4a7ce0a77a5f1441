//! Fullnode adapter - implements `LedgerReader` over Sui JSON-RPC.

mod client;
mod wire;

pub use client::{SuiNetwork, SuiRpcClient, SuiRpcConfig};
