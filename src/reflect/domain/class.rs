//! Class and interface metadata.
//!
//! A [`ClassInfo`] is the explicit stand-in for runtime reflection: it lists
//! the methods a type declares, its superclass and the interfaces it
//! implements. Instances are built once through [`ClassBuilder`] and shared
//! behind [`Arc`].

use super::method::UpcastFn;
use super::{MethodFlags, MethodInfo, MethodSignature, ReflectDomainError, ValueType};
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Validated name of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Creates a trimmed, non-empty type name.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectDomainError::EmptyTypeName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ReflectDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ReflectDomainError::EmptyTypeName);
        }
        Ok(Self(normalized))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a type is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// A class; may have a superclass and implement interfaces.
    Class,
    /// An interface; may extend other interfaces.
    Interface,
}

/// Maps a derived instance onto the embedded base instance.
#[derive(Clone)]
struct Projection {
    upcast: Arc<UpcastFn>,
    base: TypeId,
    derived: (TypeId, &'static str),
}

impl Projection {
    fn then(&self, next: &Self) -> Self {
        let first = Arc::clone(&self.upcast);
        let second = Arc::clone(&next.upcast);
        Self {
            upcast: Arc::new(upcast_fn(move |object| first(object).and_then(|base| second(base)))),
            base: next.base,
            derived: self.derived,
        }
    }
}

fn upcast_fn<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any>,
{
    f
}

struct Superclass {
    class: Arc<ClassInfo>,
    projection: Option<Projection>,
}

impl fmt::Debug for Superclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Superclass")
            .field("class", &self.class.name)
            .field("projected", &self.projection.is_some())
            .finish()
    }
}

/// A method as seen from a concrete type during enumeration.
///
/// The invoker, if any, already accounts for the projection from the
/// enumerated type onto the type that declares the method.
#[derive(Debug, Clone)]
pub struct ReflectedMethod {
    declaring_type: TypeName,
    method: MethodInfo,
}

impl ReflectedMethod {
    /// Returns the type that declares this method.
    #[must_use]
    pub const fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    /// Returns the method metadata.
    #[must_use]
    pub const fn method(&self) -> &MethodInfo {
        &self.method
    }

    /// Returns the method signature.
    #[must_use]
    pub const fn signature(&self) -> &MethodSignature {
        self.method.signature()
    }

    /// Returns the compiler-generated flags.
    #[must_use]
    pub const fn flags(&self) -> MethodFlags {
        self.method.flags()
    }
}

/// Metadata describing a class or interface.
#[derive(Debug)]
pub struct ClassInfo {
    name: TypeName,
    kind: ClassKind,
    instance_type: Option<(TypeId, &'static str)>,
    superclass: Option<Superclass>,
    interfaces: Vec<Arc<ClassInfo>>,
    methods: Vec<MethodInfo>,
}

impl ClassInfo {
    /// Starts describing a concrete class whose live instances are `T`.
    #[must_use]
    pub fn class<T: Any>(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name, ClassKind::Class, Some((TypeId::of::<T>(), std::any::type_name::<T>())))
    }

    /// Starts describing a class that is never exported directly.
    #[must_use]
    pub fn base_class(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name, ClassKind::Class, None)
    }

    /// Starts describing an interface.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder::new(name, ClassKind::Interface, None)
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    /// Returns whether this is a class or an interface.
    #[must_use]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Returns whether this is an interface.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface)
    }

    /// Returns the Rust type of live instances, for concrete classes.
    #[must_use]
    pub fn instance_type(&self) -> Option<TypeId> {
        self.instance_type.map(|(id, _)| id)
    }

    /// Returns the Rust type name of live instances, for concrete classes.
    #[must_use]
    pub fn instance_type_name(&self) -> Option<&'static str> {
        self.instance_type.map(|(_, name)| name)
    }

    /// Returns the direct superclass.
    #[must_use]
    pub fn superclass(&self) -> Option<&Arc<Self>> {
        self.superclass.as_ref().map(|superclass| &superclass.class)
    }

    /// Returns the directly implemented (or, for interfaces, extended)
    /// interfaces in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> &[Arc<Self>] {
        &self.interfaces
    }

    /// Returns the methods declared directly on this type.
    #[must_use]
    pub fn declared_methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Finds a method declared directly on this type by exact signature.
    ///
    /// When a user-authored method and a bridge or synthetic duplicate share
    /// the signature, the user-authored one is returned.
    #[must_use]
    pub fn declared_method(&self, name: &str, parameter_types: &[ValueType]) -> Option<&MethodInfo> {
        let mut candidates = self
            .methods
            .iter()
            .filter(|method| method.signature().matches(name, parameter_types));
        let first = candidates.next()?;
        if !first.flags().is_generated() {
            return Some(first);
        }
        candidates
            .find(|method| !method.flags().is_generated())
            .or(Some(first))
    }

    /// Enumerates every public method reachable from this type.
    ///
    /// Declared methods come first, then the superclass chain, then
    /// interfaces in declaration order. A method hidden by an identical
    /// declaration (same signature and return type) on a more derived type is
    /// omitted. Bridge and synthetic methods are included.
    #[must_use]
    pub fn public_methods(&self) -> Vec<ReflectedMethod> {
        let mut seen = HashSet::new();
        let mut methods = Vec::new();
        self.collect_public(&mut seen, &mut methods, None);
        methods
    }

    fn collect_public(
        &self,
        seen: &mut HashSet<(MethodSignature, ValueType)>,
        methods: &mut Vec<ReflectedMethod>,
        projection: Option<&Projection>,
    ) {
        for method in &self.methods {
            let key = (method.signature().clone(), method.return_type());
            if !seen.insert(key) {
                continue;
            }
            let invoker = method.invoker().map(|invoker| match projection {
                Some(projection) => invoker.through(
                    Arc::clone(&projection.upcast),
                    projection.base,
                    projection.derived,
                ),
                None => invoker.clone(),
            });
            methods.push(ReflectedMethod {
                declaring_type: self.name.clone(),
                method: method.with_invoker(invoker),
            });
        }

        if let Some(superclass) = &self.superclass {
            let next = match (projection, &superclass.projection) {
                (Some(outer), Some(inner)) => Some(outer.then(inner)),
                (Some(outer), None) => Some(outer.clone()),
                (None, inner) => inner.clone(),
            };
            superclass.class.collect_public(seen, methods, next.as_ref());
        }

        for interface in &self.interfaces {
            interface.collect_public(seen, methods, projection);
        }
    }
}

/// Builder for [`ClassInfo`].
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    kind: ClassKind,
    instance_type: Option<(TypeId, &'static str)>,
    superclass: Option<Superclass>,
    interfaces: Vec<Arc<ClassInfo>>,
    methods: Vec<MethodInfo>,
}

impl ClassBuilder {
    fn new(
        name: impl Into<String>,
        kind: ClassKind,
        instance_type: Option<(TypeId, &'static str)>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            instance_type,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Sets a superclass whose methods operate on the same live object.
    #[must_use]
    pub fn extends(mut self, base: Arc<ClassInfo>) -> Self {
        self.superclass = Some(Superclass {
            class: base,
            projection: None,
        });
        self
    }

    /// Sets a superclass whose methods operate on a value embedded in the
    /// live object.
    ///
    /// `project` maps the derived instance `D` to the embedded base instance
    /// `B` that the superclass methods were written against.
    #[must_use]
    pub fn extends_via<D, B, F>(mut self, base: Arc<ClassInfo>, project: F) -> Self
    where
        D: Any,
        B: Any,
        F: Fn(&D) -> &B + Send + Sync + 'static,
    {
        let upcast = upcast_fn(move |object| {
            object
                .downcast_ref::<D>()
                .map(|derived| project(derived) as &dyn Any)
        });
        self.superclass = Some(Superclass {
            class: base,
            projection: Some(Projection {
                upcast: Arc::new(upcast),
                base: TypeId::of::<B>(),
                derived: (TypeId::of::<D>(), std::any::type_name::<D>()),
            }),
        });
        self
    }

    /// Adds an implemented interface. Order of calls is declaration order.
    #[must_use]
    pub fn implements(mut self, interface: Arc<ClassInfo>) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declares a method on this type.
    #[must_use]
    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    /// Declares several methods on this type.
    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodInfo>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Validates and freezes the description.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectDomainError`] when the type or a method name is empty,
    /// a method is declared twice, two authored methods share a signature, an interface is used as a superclass, a
    /// class is listed as an interface, or an interface declares a
    /// superclass.
    pub fn build(self) -> Result<Arc<ClassInfo>, ReflectDomainError> {
        let name = TypeName::new(self.name)?;

        if let Some(superclass) = &self.superclass {
            if self.kind == ClassKind::Interface {
                return Err(ReflectDomainError::NotAClass(name));
            }
            if superclass.class.is_interface() {
                return Err(ReflectDomainError::NotAClass(superclass.class.name.clone()));
            }
        }

        if let Some(class) = self.interfaces.iter().find(|class| !class.is_interface()) {
            return Err(ReflectDomainError::NotAnInterface(class.name.clone()));
        }

        let mut declared = HashSet::new();
        let mut authored = HashSet::new();
        for method in &self.methods {
            if method.name().trim().is_empty() {
                return Err(ReflectDomainError::EmptyMethodName(name));
            }
            // One authored method per signature; generated copies may differ
            // only in return type.
            let fresh = declared.insert((method.signature(), method.return_type()))
                && (method.flags().is_generated() || authored.insert(method.signature()));
            if !fresh {
                return Err(ReflectDomainError::DuplicateMethod {
                    type_name: name,
                    signature: method.signature().clone(),
                });
            }
        }

        Ok(Arc::new(ClassInfo {
            name,
            kind: self.kind,
            instance_type: self.instance_type,
            superclass: self.superclass,
            interfaces: self.interfaces,
            methods: self.methods,
        }))
    }
}
