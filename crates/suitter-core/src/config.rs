//! Chain identifiers the read model and write path are anchored to.

use crate::domain::ObjectId;
use crate::error::{DomainError, ReadError};
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Root identifiers of a Suitter deployment.
///
/// Passed explicitly to the builders. Missing identifiers are reported as
/// `NotConfigured` by the operations that need them.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Shared Manager object owning the profiles and posts tables.
    pub manager_id: Option<ObjectId>,
    /// Published `suitter` Move package.
    pub package_id: Option<ObjectId>,
    /// Page size for table listings.
    pub page_size: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            manager_id: None,
            package_id: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ChainConfig {
    pub fn new(manager_id: ObjectId, package_id: ObjectId) -> Self {
        Self {
            manager_id: Some(manager_id),
            package_id: Some(package_id),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable ids are logged and treated as unset.
    pub fn from_env() -> Self {
        Self {
            manager_id: Self::id_from_env("SUITTER_MANAGER_ID"),
            package_id: Self::id_from_env("SUITTER_PACKAGE_ID"),
            page_size: std::env::var("SUITTER_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    fn id_from_env(key: &'static str) -> Option<ObjectId> {
        let raw = std::env::var(key).ok().filter(|s| !s.trim().is_empty())?;
        match raw.trim().parse() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(key, error = %e, "Ignoring malformed object id");
                None
            }
        }
    }

    pub fn manager(&self) -> Result<ObjectId, ReadError> {
        self.manager_id
            .ok_or(ReadError::NotConfigured("SUITTER_MANAGER_ID"))
    }

    /// Package and manager ids, both required to build transactions.
    pub fn write_targets(&self) -> Result<(ObjectId, ObjectId), DomainError> {
        let package = self
            .package_id
            .ok_or(DomainError::NotConfigured("SUITTER_PACKAGE_ID"))?;
        let manager = self
            .manager_id
            .ok_or(DomainError::NotConfigured("SUITTER_MANAGER_ID"))?;
        Ok((package, manager))
    }
}
