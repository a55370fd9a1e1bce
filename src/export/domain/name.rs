//! Validated external name of an exported object.

use super::ExportDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 255;

/// External name under which a live object is exported.
///
/// Names are trimmed and compared verbatim; structure such as
/// `domain:key=value` is left to the naming layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportName(String);

impl ExportName {
    /// Creates a validated export name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportDomainError::EmptyExportName`] when the value is empty
    /// after trimming, [`ExportDomainError::ExportNameTooLong`] when it
    /// exceeds 255 characters, or [`ExportDomainError::InvalidExportName`]
    /// when it contains control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ExportDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(ExportDomainError::EmptyExportName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(ExportDomainError::ExportNameTooLong(raw));
        }

        if normalized.chars().any(char::is_control) {
            return Err(ExportDomainError::InvalidExportName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExportName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ExportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
