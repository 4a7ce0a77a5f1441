//! Application state - shared across all handlers.

use std::sync::Arc;

use suitter_core::domain::Address;
use suitter_core::ports::LedgerReader;
use suitter_core::{ChainConfig, ReadModelBuilder};
use suitter_infra::SuitterFixture;

use crate::config::{AppConfig, LedgerBackend};

pub type Reader = ReadModelBuilder<Arc<dyn LedgerReader>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<Reader>,
    pub backend: LedgerBackend,
}

impl AppState {
    /// Build the application state with the configured ledger backend.
    pub fn new(config: &AppConfig) -> Self {
        let state = match config.backend {
            LedgerBackend::Rpc => Self::rpc(config),
            LedgerBackend::Memory => Self::demo(),
        };

        tracing::info!(
            backend = state.backend.name(),
            manager = ?state.reader.config().manager_id,
            package = ?state.reader.config().package_id,
            "Application state initialized"
        );
        state
    }

    /// State over an arbitrary ledger.
    pub fn with_ledger(ledger: Arc<dyn LedgerReader>, chain: ChainConfig, backend: LedgerBackend) -> Self {
        Self {
            reader: Arc::new(ReadModelBuilder::new(ledger, chain)),
            backend,
        }
    }

    #[cfg(feature = "rpc")]
    fn rpc(config: &AppConfig) -> Self {
        match suitter_infra::SuiRpcClient::new(config.rpc.clone()) {
            Ok(client) => Self::with_ledger(Arc::new(client), config.chain.clone(), LedgerBackend::Rpc),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build Sui RPC client. Using in-memory fallback.");
                Self::demo()
            }
        }
    }

    #[cfg(not(feature = "rpc"))]
    fn rpc(_config: &AppConfig) -> Self {
        tracing::warn!("Built without the rpc feature - using in-memory ledger");
        Self::demo()
    }

    /// Seeded in-memory deployment. Its own ids replace any configured ones.
    fn demo() -> Self {
        let mut fixture = SuitterFixture::new();
        let ann = Address::from_low_u64(0xa11ce);
        let bob = Address::from_low_u64(0xb0b);

        fixture
            .profile(ann, "ann", "Building on Sui", None)
            .profile(bob, "bob", "", Some("https://picsum.photos/seed/bob/200"));
        let welcome = fixture.post(ann, "gm Suitter", None);
        fixture.comment(welcome, bob, "gm!");
        fixture.post(bob, "First post with a picture", Some("https://picsum.photos/seed/post/600"));

        let chain = fixture.config();
        Self::with_ledger(Arc::new(fixture.into_ledger()), chain, LedgerBackend::Memory)
    }
}
