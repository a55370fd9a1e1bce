//! Port contracts for exported-object storage.
//!
//! The protocol server and the exporter only see the registry through these
//! traits.

pub mod repository;

pub use repository::{
    ManagedObjectRepository, ManagedObjectRepositoryError, ManagedObjectRepositoryResult,
};

#[cfg(test)]
pub use repository::MockManagedObjectRepository;
