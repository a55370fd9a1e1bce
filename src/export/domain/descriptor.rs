//! Attribute and operation descriptors.

use super::DiscoveryError;
use crate::reflect::domain::{
    InvocationError, InvocationResult, MethodInvoker, MethodSignature, ReflectedMethod, TypeName,
    Value, ValueType,
};
use std::any::{Any, TypeId};
use std::collections::BTreeMap;

/// A manageable method with its implementation resolved.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    declaring_type: TypeName,
    signature: MethodSignature,
    return_type: ValueType,
    invoker: MethodInvoker,
}

impl BoundMethod {
    /// Binds a reflected method to its implementation.
    ///
    /// With `instance` set, the implementation must accept that Rust type as
    /// its target, directly or through the superclass projection it was
    /// enumerated with.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::AbstractMethod`] when the method has no
    /// implementation reachable from the exported type, and
    /// [`DiscoveryError::IncompatibleImplementation`] when the implementation
    /// targets a different type than `instance`.
    pub fn bind(
        method: &ReflectedMethod,
        instance: Option<(TypeId, &'static str)>,
    ) -> Result<Self, DiscoveryError> {
        let invoker = method
            .method()
            .invoker()
            .cloned()
            .ok_or_else(|| DiscoveryError::AbstractMethod {
                type_name: method.declaring_type().clone(),
                signature: method.signature().clone(),
            })?;
        if let Some((instance_type, instance_name)) = instance
            && invoker.target_type() != instance_type
        {
            return Err(DiscoveryError::IncompatibleImplementation {
                type_name: method.declaring_type().clone(),
                signature: method.signature().clone(),
                implemented_for: invoker.target_type_name(),
                instance: instance_name,
            });
        }
        Ok(Self {
            declaring_type: method.declaring_type().clone(),
            signature: method.signature().clone(),
            return_type: method.method().return_type(),
            invoker,
        })
    }

    /// Returns the declaring type.
    #[must_use]
    pub const fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
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

    /// Invokes the method on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::ArgumentCount`] on an arity mismatch, or any
    /// error raised by the invoker.
    pub fn invoke(&self, target: &dyn Any, args: &[Value]) -> InvocationResult {
        if args.len() != self.signature.arity() {
            return Err(InvocationError::ArgumentCount {
                expected: self.signature.arity(),
                actual: args.len(),
            });
        }
        self.invoker.invoke(target, args)
    }
}

/// A named value exposed through a read accessor, a write accessor, or both.
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    name: String,
    value_type: ValueType,
    read: Option<BoundMethod>,
    write: Option<BoundMethod>,
    description: Option<String>,
}

impl AttributeDescriptor {
    /// Creates a descriptor from validated accessors.
    ///
    /// Callers guarantee that at least one accessor is present and that both
    /// agree on `value_type`.
    pub(crate) const fn new(
        name: String,
        value_type: ValueType,
        read: Option<BoundMethod>,
        write: Option<BoundMethod>,
        description: Option<String>,
    ) -> Self {
        Self {
            name,
            value_type,
            read,
            write,
            description,
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared value type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the read accessor.
    #[must_use]
    pub const fn read_method(&self) -> Option<&BoundMethod> {
        self.read.as_ref()
    }

    /// Returns the write accessor.
    #[must_use]
    pub const fn write_method(&self) -> Option<&BoundMethod> {
        self.write.as_ref()
    }

    /// Returns whether the attribute can be read.
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    /// Returns whether the attribute can be written.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    /// Returns whether the read accessor uses the `is` prefix.
    #[must_use]
    pub fn is_is_accessor(&self) -> bool {
        self.read
            .as_ref()
            .is_some_and(|read| read.name().starts_with("is"))
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// An invocable behaviour, one per overload.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    method: BoundMethod,
    description: Option<String>,
}

impl OperationDescriptor {
    pub(crate) const fn new(method: BoundMethod, description: Option<String>) -> Self {
        Self {
            method,
            description,
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.method.name()
    }

    /// Returns the signature that identifies this overload.
    #[must_use]
    pub const fn signature(&self) -> &MethodSignature {
        self.method.signature()
    }

    /// Returns the parameter types.
    #[must_use]
    pub fn parameter_types(&self) -> &[ValueType] {
        self.method.signature().parameter_types()
    }

    /// Returns the return type.
    #[must_use]
    pub const fn return_type(&self) -> ValueType {
        self.method.return_type()
    }

    /// Returns the bound method.
    #[must_use]
    pub const fn method(&self) -> &BoundMethod {
        &self.method
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The complete manageable surface of one exported type.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    attributes: BTreeMap<String, AttributeDescriptor>,
    operations: BTreeMap<MethodSignature, OperationDescriptor>,
    rejected: Vec<DiscoveryError>,
}

impl DescriptorSet {
    pub(crate) const fn new(
        attributes: BTreeMap<String, AttributeDescriptor>,
        operations: BTreeMap<MethodSignature, OperationDescriptor>,
        rejected: Vec<DiscoveryError>,
    ) -> Self {
        Self {
            attributes,
            operations,
            rejected,
        }
    }

    /// Finds an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.get(name)
    }

    /// Iterates over attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.values()
    }

    /// Finds an operation by exact signature.
    #[must_use]
    pub fn operation(&self, signature: &MethodSignature) -> Option<&OperationDescriptor> {
        self.operations.get(signature)
    }

    /// Iterates over all operations in signature order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.values()
    }

    /// Iterates over the overloads of one operation name.
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OperationDescriptor> {
        self.operations
            .values()
            .filter(move |operation| operation.name() == name)
    }

    /// Returns the attribute declarations rejected at build time.
    #[must_use]
    pub fn rejected(&self) -> &[DiscoveryError] {
        &self.rejected
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}
