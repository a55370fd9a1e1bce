//! In-memory repository of exported objects.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::export::{
    domain::{ExportName, ManagedObject},
    ports::{ManagedObjectRepository, ManagedObjectRepositoryError, ManagedObjectRepositoryResult},
};

/// Thread-safe in-memory registry.
///
/// A single lock guards the whole mapping. Entries are inserted fully built,
/// so readers never observe a partial export.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManagedObjectRepository {
    state: Arc<RwLock<HashMap<ExportName, Arc<ManagedObject>>>>,
}

impl InMemoryManagedObjectRepository {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ManagedObjectRepository for InMemoryManagedObjectRepository {
    fn insert(&self, object: Arc<ManagedObject>) -> ManagedObjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ManagedObjectRepositoryError::storage(std::io::Error::other(err.to_string()))
        })?;

        if state.contains_key(object.name()) {
            return Err(ManagedObjectRepositoryError::DuplicateName(
                object.name().clone(),
            ));
        }

        state.insert(object.name().clone(), object);
        Ok(())
    }

    fn remove(&self, name: &ExportName) -> ManagedObjectRepositoryResult<Option<Arc<ManagedObject>>> {
        let mut state = self.state.write().map_err(|err| {
            ManagedObjectRepositoryError::storage(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.remove(name))
    }

    fn find_by_name(
        &self,
        name: &ExportName,
    ) -> ManagedObjectRepositoryResult<Option<Arc<ManagedObject>>> {
        let state = self.state.read().map_err(|err| {
            ManagedObjectRepositoryError::storage(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(name).cloned())
    }

    fn list_all(&self) -> ManagedObjectRepositoryResult<Vec<Arc<ManagedObject>>> {
        let state = self.state.read().map_err(|err| {
            ManagedObjectRepositoryError::storage(std::io::Error::other(err.to_string()))
        })?;
        let mut objects: Vec<_> = state.values().cloned().collect();
        objects.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(objects)
    }
}
