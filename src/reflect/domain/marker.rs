//! The manageable marker.

use serde::{Deserialize, Serialize};

/// Marks a method as part of the manageable surface.
///
/// The optional description is carried through to attribute and operation
/// descriptors. A blank description is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Managed {
    description: Option<String>,
}

impl Managed {
    /// Creates a marker without a description.
    #[must_use]
    pub const fn new() -> Self {
        Self { description: None }
    }

    /// Creates a marker with a human-readable description.
    #[must_use]
    pub fn described(description: impl Into<String>) -> Self {
        let trimmed = description.into().trim().to_owned();
        Self {
            description: (!trimmed.is_empty()).then_some(trimmed),
        }
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
