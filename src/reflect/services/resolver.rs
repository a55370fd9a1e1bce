//! Marker resolution across superclasses and interfaces.

use crate::reflect::domain::{ClassInfo, Managed, MethodInfo, MethodSignature, ValueType};
use std::collections::HashMap;
use tracing::trace;

/// Finds the marker that applies to a method signature on a type.
///
/// The search is depth-first: the type itself, then its superclass chain,
/// then each implemented interface in declaration order. The first marker
/// found wins, so conflicting markers on sibling interfaces resolve to the
/// one declared first.
///
/// Results are memoised per `(type, signature)` for the lifetime of the
/// resolver, which is normally a single scan.
#[derive(Debug)]
pub struct MarkerResolver {
    memoize: bool,
    cache: HashMap<(usize, MethodSignature), Option<Managed>>,
}

impl Default for MarkerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerResolver {
    /// Creates a memoising resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            memoize: true,
            cache: HashMap::new(),
        }
    }

    /// Creates a resolver that walks the hierarchy on every call.
    #[must_use]
    pub fn without_memoization() -> Self {
        Self {
            memoize: false,
            cache: HashMap::new(),
        }
    }

    /// Returns the number of memoised lookups.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether `name(parameter_types)` is marked manageable anywhere
    /// in the hierarchy of `class`.
    pub fn is_managed(&mut self, class: &ClassInfo, name: &str, parameter_types: &[ValueType]) -> bool {
        self.resolve(class, name, parameter_types).is_some()
    }

    /// Resolves the marker for `name(parameter_types)` starting at `class`.
    ///
    /// A type that does not declare the signature contributes nothing; the
    /// search moves on to its supertypes.
    pub fn resolve(
        &mut self,
        class: &ClassInfo,
        name: &str,
        parameter_types: &[ValueType],
    ) -> Option<Managed> {
        if !self.memoize {
            return self.resolve_uncached(class, name, parameter_types);
        }

        let key = (
            std::ptr::from_ref(class).addr(),
            MethodSignature::new(name, parameter_types.iter().copied()),
        );
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let marker = self.resolve_uncached(class, name, parameter_types);
        self.cache.insert(key, marker.clone());
        marker
    }

    fn resolve_uncached(
        &mut self,
        class: &ClassInfo,
        name: &str,
        parameter_types: &[ValueType],
    ) -> Option<Managed> {
        if let Some(marker) = class
            .declared_method(name, parameter_types)
            .and_then(MethodInfo::marker)
        {
            trace!(type_name = %class.name(), method = name, "marker declared");
            return Some(marker.clone());
        }

        if let Some(superclass) = class.superclass()
            && let Some(marker) = self.resolve(superclass, name, parameter_types)
        {
            return Some(marker);
        }

        class
            .interfaces()
            .iter()
            .find_map(|interface| self.resolve(interface, name, parameter_types))
    }
}
