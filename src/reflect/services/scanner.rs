//! Enumeration of the manageable surface of a type.

use super::MarkerResolver;
use crate::reflect::domain::{ClassInfo, Managed, MethodSignature, ReflectedMethod, TypeName};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A public method that resolved to a marker.
#[derive(Debug, Clone)]
pub struct ManageableMethod {
    method: ReflectedMethod,
    marker: Managed,
}

impl ManageableMethod {
    /// Returns the type that declares the method, as seen from the scanned
    /// type.
    #[must_use]
    pub const fn declaring_type(&self) -> &TypeName {
        self.method.declaring_type()
    }

    /// Returns the signature.
    #[must_use]
    pub const fn signature(&self) -> &MethodSignature {
        self.method.signature()
    }

    /// Returns the reflected method, including its bound invoker.
    #[must_use]
    pub const fn method(&self) -> &ReflectedMethod {
        &self.method
    }

    /// Returns the resolved marker.
    #[must_use]
    pub const fn marker(&self) -> &Managed {
        &self.marker
    }
}

/// Manageable methods of one type, one entry per signature.
pub type ManageableSurface = BTreeMap<MethodSignature, ManageableMethod>;

/// Scans a type for manageable methods.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceScanner {
    memoize: bool,
}

impl Default for SurfaceScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceScanner {
    /// Creates a scanner that memoises marker lookups within a scan.
    #[must_use]
    pub const fn new() -> Self {
        Self { memoize: true }
    }

    /// Creates a scanner that resolves every marker from scratch.
    #[must_use]
    pub const fn without_memoization() -> Self {
        Self { memoize: false }
    }

    /// Returns the marked public methods of `class`.
    ///
    /// Bridge and synthetic methods are discarded before resolution. When a
    /// signature is reachable more than once, the most derived declaration is
    /// kept.
    #[must_use]
    pub fn scan(&self, class: &ClassInfo) -> ManageableSurface {
        let mut resolver = if self.memoize {
            MarkerResolver::new()
        } else {
            MarkerResolver::without_memoization()
        };
        let mut surface = ManageableSurface::new();

        for method in class.public_methods() {
            if method.flags().is_generated() {
                trace!(type_name = %class.name(), method = %method.signature(), "skipping generated method");
                continue;
            }
            if surface.contains_key(method.signature()) {
                continue;
            }
            let signature = method.signature();
            let Some(marker) = resolver.resolve(class, signature.name(), signature.parameter_types())
            else {
                continue;
            };
            surface.insert(signature.clone(), ManageableMethod { method, marker });
        }

        debug!(
            type_name = %class.name(),
            manageable = surface.len(),
            cached = resolver.cached_entries(),
            "scanned manageable surface"
        );
        surface
    }
}
