//! Discovery services over type metadata.
//!
//! [`MarkerResolver`] finds the nearest marker for a signature across a type
//! hierarchy; [`SurfaceScanner`] applies it to every public method of a type.

mod resolver;
mod scanner;

pub use resolver::MarkerResolver;
pub use scanner::{ManageableMethod, ManageableSurface, SurfaceScanner};
