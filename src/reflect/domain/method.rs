//! Method metadata and the invokers bound to it.

use super::{
    InvocationError, InvocationResult, Managed, ManagedValue, MethodSignature, Value, ValueType,
};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

type InvokeFn = dyn Fn(&dyn Any, &[Value]) -> InvocationResult + Send + Sync;

/// Projects a derived object onto an embedded base object.
pub(crate) type UpcastFn = dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync;

/// Compiler-generated method flags.
///
/// Bridge and synthetic methods exist in the metadata so that enumeration can
/// see them, but they are never part of the manageable surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MethodFlags {
    synthetic: bool,
    bridge: bool,
}

impl MethodFlags {
    /// Returns whether the method was synthesised rather than authored.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        self.synthetic
    }

    /// Returns whether the method is a bridge duplicate of another method
    /// (covariant return or erased parameter types).
    #[must_use]
    pub const fn is_bridge(self) -> bool {
        self.bridge
    }

    /// Returns whether either flag is set.
    #[must_use]
    pub const fn is_generated(self) -> bool {
        self.synthetic || self.bridge
    }
}

/// Type-erased callable bound to a concrete Rust type.
#[derive(Clone)]
pub struct MethodInvoker {
    call: Arc<InvokeFn>,
    target_type: TypeId,
    target_type_name: &'static str,
}

impl MethodInvoker {
    /// Wraps a closure over `T`.
    ///
    /// The target is downcast to `T` on each call; a target of any other type
    /// yields [`InvocationError::TargetMismatch`].
    pub fn new<T, F>(f: F) -> Self
    where
        T: Any,
        F: Fn(&T, &[Value]) -> InvocationResult + Send + Sync + 'static,
    {
        Self {
            call: Arc::new(move |target: &dyn Any, args: &[Value]| {
                let object = target
                    .downcast_ref::<T>()
                    .ok_or(InvocationError::TargetMismatch {
                        expected: std::any::type_name::<T>(),
                    })?;
                f(object, args)
            }),
            target_type: TypeId::of::<T>(),
            target_type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the type a target must have for the call to succeed.
    #[must_use]
    pub const fn target_type(&self) -> TypeId {
        self.target_type
    }

    /// Returns the Rust name of [`Self::target_type`].
    #[must_use]
    pub const fn target_type_name(&self) -> &'static str {
        self.target_type_name
    }

    /// Calls the underlying closure.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the target has the wrong type, the
    /// arguments do not convert, or the method itself fails.
    pub fn invoke(&self, target: &dyn Any, args: &[Value]) -> InvocationResult {
        (self.call)(target, args)
    }

    /// Returns an invoker over `derived` that first projects the target
    /// through `upcast`.
    ///
    /// The projection is only applied when this invoker's own target type is
    /// the one `upcast` produces; any other invoker keeps its target type, so
    /// a mismatch stays visible to [`Self::target_type`].
    pub(crate) fn through(
        &self,
        upcast: Arc<UpcastFn>,
        projected: TypeId,
        derived: (TypeId, &'static str),
    ) -> Self {
        if projected != self.target_type {
            return self.clone();
        }
        let inner = Arc::clone(&self.call);
        let (target_type, target_type_name) = derived;
        Self {
            call: Arc::new(move |target: &dyn Any, args: &[Value]| {
                let base = upcast(target).ok_or(InvocationError::TargetMismatch {
                    expected: target_type_name,
                })?;
                inner(base, args)
            }),
            target_type,
            target_type_name,
        }
    }
}

impl fmt::Debug for MethodInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInvoker")
            .field("target_type", &self.target_type_name)
            .finish_non_exhaustive()
    }
}

/// Positional arguments handed to an operation closure.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Wraps raw argument values.
    #[must_use]
    pub const fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    /// Converts the argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::ArgumentCount`] when `index` is out of range
    /// and [`InvocationError::ArgumentType`] when the value does not convert.
    pub fn get<A: ManagedValue>(&self, index: usize) -> InvocationResult<A> {
        let value = self
            .values
            .get(index)
            .cloned()
            .ok_or(InvocationError::ArgumentCount {
                expected: index + 1,
                actual: self.values.len(),
            })?;
        A::from_value(value).ok_or(InvocationError::ArgumentType {
            index,
            expected: A::value_type(),
        })
    }

    /// Returns the raw argument values.
    #[must_use]
    pub const fn raw(&self) -> &'a [Value] {
        self.values
    }

    /// Returns the number of arguments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no arguments were supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Metadata for one method declared on a type.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    signature: MethodSignature,
    return_type: ValueType,
    marker: Option<Managed>,
    flags: MethodFlags,
    invoker: Option<MethodInvoker>,
}

impl MethodInfo {
    /// Creates an implemented method from an explicit signature.
    #[must_use]
    pub const fn new(signature: MethodSignature, return_type: ValueType, invoker: MethodInvoker) -> Self {
        Self {
            signature,
            return_type,
            marker: None,
            flags: MethodFlags {
                synthetic: false,
                bridge: false,
            },
            invoker: Some(invoker),
        }
    }

    /// Creates a declaration without an implementation, as found on
    /// interfaces.
    #[must_use]
    pub fn abstract_method(
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = ValueType>,
        return_type: ValueType,
    ) -> Self {
        Self {
            signature: MethodSignature::new(name, parameter_types),
            return_type,
            marker: None,
            flags: MethodFlags::default(),
            invoker: None,
        }
    }

    /// Creates a zero-argument accessor over `T` returning `V`.
    pub fn getter<T, V, F>(name: impl Into<String>, f: F) -> Self
    where
        T: Any,
        V: ManagedValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let invoker = MethodInvoker::new(move |object: &T, _args: &[Value]| Ok(f(object).into_value()));
        Self::new(MethodSignature::new(name, []), V::value_type(), invoker)
    }

    /// Creates a one-argument mutator over `T` accepting `V`.
    pub fn setter<T, V, F>(name: impl Into<String>, f: F) -> Self
    where
        T: Any,
        V: ManagedValue,
        F: Fn(&T, V) + Send + Sync + 'static,
    {
        let invoker = MethodInvoker::new(move |object: &T, args: &[Value]| {
            let value = Args::new(args).get::<V>(0)?;
            f(object, value);
            Ok(Value::Null)
        });
        Self::new(
            MethodSignature::new(name, [V::value_type()]),
            ValueType::VOID,
            invoker,
        )
    }

    /// Creates an operation over `T` with explicit parameter and return
    /// types.
    pub fn operation<T, F>(
        name: impl Into<String>,
        parameter_types: impl IntoIterator<Item = ValueType>,
        return_type: ValueType,
        f: F,
    ) -> Self
    where
        T: Any,
        F: Fn(&T, Args<'_>) -> InvocationResult + Send + Sync + 'static,
    {
        let invoker = MethodInvoker::new(move |object: &T, args: &[Value]| f(object, Args::new(args)));
        Self::new(MethodSignature::new(name, parameter_types), return_type, invoker)
    }

    /// Attaches a marker without a description.
    #[must_use]
    pub fn managed(self) -> Self {
        self.with_marker(Managed::new())
    }

    /// Attaches a marker with a description.
    #[must_use]
    pub fn described(self, description: impl Into<String>) -> Self {
        self.with_marker(Managed::described(description))
    }

    /// Attaches the given marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Managed) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Flags the method as compiler-synthesised.
    #[must_use]
    pub const fn synthetic(mut self) -> Self {
        self.flags.synthetic = true;
        self
    }

    /// Flags the method as a bridge duplicate.
    #[must_use]
    pub const fn bridge(mut self) -> Self {
        self.flags.bridge = true;
        self
    }

    /// Returns the signature.
    #[must_use]
    pub const fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Returns the return type.
    #[must_use]
    pub const fn return_type(&self) -> ValueType {
        self.return_type
    }

    /// Returns the marker declared directly on this method.
    #[must_use]
    pub const fn marker(&self) -> Option<&Managed> {
        self.marker.as_ref()
    }

    /// Returns the compiler-generated flags.
    #[must_use]
    pub const fn flags(&self) -> MethodFlags {
        self.flags
    }

    /// Returns the implementation, or `None` for an abstract declaration.
    #[must_use]
    pub const fn invoker(&self) -> Option<&MethodInvoker> {
        self.invoker.as_ref()
    }

    pub(crate) fn with_invoker(&self, invoker: Option<MethodInvoker>) -> Self {
        Self {
            invoker,
            ..self.clone()
        }
    }
}
