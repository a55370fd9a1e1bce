//! In-memory adapters.

mod repository;

pub use repository::InMemoryManagedObjectRepository;
