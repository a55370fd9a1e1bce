//! Type metadata and manageable-surface discovery.
//!
//! Rust has no runtime reflection, so object owners describe their types with
//! an explicit metadata table: [`domain::ClassInfo`] values listing declared
//! methods, superclass and implemented interfaces, each method optionally
//! carrying a [`domain::Managed`] marker. This module walks that table the way
//! a reflective runtime would:
//!
//! - Domain types in [`domain`]
//! - Marker resolution and surface scanning in [`services`]

pub mod domain;
pub mod services;
