//! Manageable: expose parts of live objects to management clients.
//!
//! An object owner describes a type's methods, marks the accessors and
//! behaviours that should be manageable, and exports a live instance under an
//! external name. A management protocol server can then list, read, write
//! and invoke those members by name without linking against the owner's
//! types.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`reflect`]: Type metadata, marker resolution and surface scanning
//! - [`export`]: Descriptor building, dynamic invocation and the export
//!   registry

pub mod export;
pub mod reflect;
