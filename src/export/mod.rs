//! Exporting live objects to management clients.
//!
//! An export scans a type for its manageable surface, pairs accessors into
//! attributes, classifies the remaining marked methods as operations, and
//! binds the result to a live object under an external name. Requests from a
//! protocol server then read, write and invoke through that binding. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
