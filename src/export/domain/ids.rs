//! Export identities.
//!
//! A name can be bound, released and bound again; the [`ExportId`] tells
//! those bindings apart in listings and logs.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Identity of one binding of a live object to an export name.
///
/// Each successful export mints a fresh id. Unexporting and exporting the
/// same object under the same name again yields a different id, so a client
/// holding an old id can tell that the binding it saw is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportId(Uuid);

impl ExportId {
    /// Mints the id for a new binding. Never equal to any earlier id.
    #[expect(
        clippy::new_without_default,
        reason = "ids are minted by export, not defaulted"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Rebuilds an id a client received earlier, e.g. from an
    /// [`ExportSummary`](super::ExportSummary).
    ///
    /// Only compares equal to the binding it was taken from; it does not
    /// refer to whatever is currently exported under that binding's name.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID behind the id.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ExportId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ExportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}
