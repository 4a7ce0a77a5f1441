//! Application configuration loaded from environment variables.

use std::env;

use suitter_core::ChainConfig;

#[cfg(feature = "rpc")]
use suitter_infra::SuiRpcConfig;

/// Where ledger reads are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerBackend {
    /// A Sui fullnode over JSON-RPC.
    Rpc,
    /// A seeded in-memory deployment, for local development.
    Memory,
}

impl LedgerBackend {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerBackend::Rpc => "rpc",
            LedgerBackend::Memory => "memory",
        }
    }

    fn from_env() -> Self {
        match env::var("SUITTER_LEDGER").as_deref() {
            Ok("memory") => LedgerBackend::Memory,
            Ok("rpc") => LedgerBackend::Rpc,
            Ok(other) => {
                tracing::warn!(backend = other, "Unknown SUITTER_LEDGER, using default");
                Self::default_backend()
            }
            Err(_) => Self::default_backend(),
        }
    }

    fn default_backend() -> Self {
        if cfg!(feature = "rpc") {
            LedgerBackend::Rpc
        } else {
            LedgerBackend::Memory
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: LedgerBackend,
    pub chain: ChainConfig,
    #[cfg(feature = "rpc")]
    pub rpc: SuiRpcConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            backend: LedgerBackend::from_env(),
            chain: ChainConfig::from_env(),
            #[cfg(feature = "rpc")]
            rpc: SuiRpcConfig::from_env(),
        }
    }
}
