//! Adapter implementations for exported-object storage.

pub mod memory;
