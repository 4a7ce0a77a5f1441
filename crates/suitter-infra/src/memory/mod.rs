//! In-memory ledger and a fixture builder that lays out a Suitter
//! deployment the way the Move package stores it.

mod fixture;
mod ledger;

pub use fixture::SuitterFixture;
pub use ledger::{InMemoryLedger, LedgerState};
