//! Transaction executor adapters.

mod settling;

pub use settling::SettlingExecutor;
