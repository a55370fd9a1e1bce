//! Error types for type metadata construction and method invocation.

use super::{MethodSignature, TypeName, ValueType};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while building class metadata.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReflectDomainError {
    /// The type name is empty after trimming.
    #[error("type name must not be empty")]
    EmptyTypeName,

    /// A method name is empty after trimming.
    #[error("method name on type '{0}' must not be empty")]
    EmptyMethodName(TypeName),

    /// The same signature and return type is declared twice on one type.
    #[error("method {signature} is declared more than once on type '{type_name}'")]
    DuplicateMethod {
        /// Declaring type.
        type_name: TypeName,
        /// Offending signature.
        signature: MethodSignature,
    },

    /// A class was supplied where an interface is required.
    #[error("type '{0}' is not an interface")]
    NotAnInterface(TypeName),

    /// An interface was supplied where a class is required.
    #[error("type '{0}' is not a class")]
    NotAClass(TypeName),
}

/// Result type for method invocation.
pub type InvocationResult<T = super::Value> = Result<T, InvocationError>;

/// Errors raised while invoking a method against a live object.
#[derive(Debug, Clone, Error)]
pub enum InvocationError {
    /// The live object is not an instance of the type the method was
    /// declared for.
    #[error("target object is not an instance of {expected}")]
    TargetMismatch {
        /// Rust type name the invoker expected.
        expected: &'static str,
    },

    /// The number of supplied arguments differs from the method arity.
    #[error("expected {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Declared arity.
        expected: usize,
        /// Supplied arity.
        actual: usize,
    },

    /// An argument could not be converted to the parameter type.
    #[error("argument {index} is not assignable to {expected}")]
    ArgumentType {
        /// Zero-based argument position.
        index: usize,
        /// Declared parameter type.
        expected: ValueType,
    },

    /// The underlying method itself failed.
    #[error("method failed: {0}")]
    Failed(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl InvocationError {
    /// Wraps an error raised by the underlying method.
    pub fn failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failed(Arc::new(err))
    }
}
