//! Ports - trait definitions for the ledger this crate reads and writes.
//! These are the "interfaces" that infrastructure must implement.

mod ledger;
mod transaction;

pub use ledger::{DynamicFieldInfo, DynamicFieldName, LedgerError, LedgerObject, LedgerReader};
pub use transaction::{TransactionError, TransactionExecutor, TxDigest};
