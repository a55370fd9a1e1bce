//! Export-time configuration.

/// Settings applied while building descriptors for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportConfig {
    /// Whether an inconsistent attribute declaration fails the whole export
    /// instead of dropping only that attribute.
    pub fail_on_inconsistent_attribute: bool,
    /// Whether marker lookups are memoised during a scan.
    pub memoize_markers: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fail_on_inconsistent_attribute: false,
            memoize_markers: true,
        }
    }
}

impl ExportConfig {
    /// Creates a configuration that rejects any inconsistent declaration.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            fail_on_inconsistent_attribute: true,
            ..Self::default()
        }
    }

    /// Disables marker memoisation.
    #[must_use]
    pub const fn without_memoization(mut self) -> Self {
        self.memoize_markers = false;
        self
    }
}
