//! Repository port mapping external names to exported objects.

use crate::export::domain::{ExportName, ManagedObject};
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type ManagedObjectRepositoryResult<T> = Result<T, ManagedObjectRepositoryError>;

/// Name-to-entry mapping for exported objects.
///
/// Implementations must make `insert` and `remove` atomic with respect to
/// lookups: a name resolves either to a complete entry or to nothing.
#[cfg_attr(test, mockall::automock)]
pub trait ManagedObjectRepository: Send + Sync {
    /// Stores a new entry under its name.
    ///
    /// # Errors
    ///
    /// Returns [`ManagedObjectRepositoryError::DuplicateName`] when the name
    /// is already taken.
    fn insert(&self, object: Arc<ManagedObject>) -> ManagedObjectRepositoryResult<()>;

    /// Removes and returns the entry for `name`, or `None` if absent.
    fn remove(&self, name: &ExportName) -> ManagedObjectRepositoryResult<Option<Arc<ManagedObject>>>;

    /// Finds the entry for `name`.
    fn find_by_name(
        &self,
        name: &ExportName,
    ) -> ManagedObjectRepositoryResult<Option<Arc<ManagedObject>>>;

    /// Returns all entries ordered by name.
    fn list_all(&self) -> ManagedObjectRepositoryResult<Vec<Arc<ManagedObject>>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ManagedObjectRepositoryError {
    /// Another object is already exported under this name.
    #[error("an object is already exported as '{0}'")]
    DuplicateName(ExportName),

    /// Storage-layer failure.
    #[error("registry storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl ManagedObjectRepositoryError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
