//! Error types for exports and management requests.

use super::ExportName;
use crate::reflect::domain::{InvocationError, MethodSignature, TypeName, ValueKind, ValueType};
use thiserror::Error;

/// Errors returned while constructing export domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportDomainError {
    /// The export name is empty after trimming.
    #[error("export name must not be empty")]
    EmptyExportName,

    /// The export name exceeds the 255-character limit.
    #[error("export name exceeds 255 character limit: {0}")]
    ExportNameTooLong(String),

    /// The export name contains control characters.
    #[error("export name '{0}' contains control characters")]
    InvalidExportName(String),
}

/// Errors detected while discovering the manageable surface of a type.
///
/// These surface when an object is exported, never on a later request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Accessors for one attribute disagree on its value type.
    #[error("inconsistent declaration of attribute '{attribute}': {reason}")]
    InconsistentDeclaration {
        /// Attribute name.
        attribute: String,
        /// Description of the conflict.
        reason: String,
    },

    /// A marked method has no implementation on the exported type.
    #[error("manageable method {signature} declared on '{type_name}' has no implementation")]
    AbstractMethod {
        /// Type that declares the method.
        type_name: TypeName,
        /// Method signature.
        signature: MethodSignature,
    },

    /// A manageable method is implemented over a Rust type that the
    /// exported instance cannot be projected onto.
    #[error(
        "manageable method {signature} declared on '{type_name}' is implemented for {implemented_for}, not {instance}"
    )]
    IncompatibleImplementation {
        /// Type that declares the method.
        type_name: TypeName,
        /// Method signature.
        signature: MethodSignature,
        /// Rust type the implementation expects as its target.
        implemented_for: &'static str,
        /// Rust type of the exported instance.
        instance: &'static str,
    },

    /// Interfaces cannot be exported.
    #[error("type '{0}' is an interface and cannot be exported")]
    NotAClass(TypeName),

    /// The class does not declare a Rust instance type.
    #[error("type '{0}' does not declare an instance type")]
    NotInstantiable(TypeName),

    /// The live object is not an instance of the class being exported.
    #[error("type '{type_name}' describes {expected}, but the object is {actual}")]
    TypeMismatch {
        /// Exported class.
        type_name: TypeName,
        /// Rust type the class describes.
        expected: &'static str,
        /// Rust type of the supplied object.
        actual: &'static str,
    },
}

/// Result type for management requests against an exported object.
pub type ManagementResult<T> = Result<T, ManagementError>;

/// Per-request errors.
///
/// All variants leave the exported entry untouched; the caller may retry or
/// continue with other requests.
#[derive(Debug, Clone, Error)]
pub enum ManagementError {
    /// No attribute has this name, or it lacks the requested direction.
    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    /// The value is not assignable to the declared type.
    #[error("invalid value for '{member}': expected {expected}, got {}", display_kind(.actual))]
    InvalidValue {
        /// Attribute or operation name.
        member: String,
        /// Declared type.
        expected: ValueType,
        /// Runtime kind of the rejected value; `None` for null.
        actual: Option<ValueKind>,
    },

    /// No operation matches the name and arguments.
    #[error("operation '{operation}' with {arguments} argument(s) not found")]
    OperationNotFound {
        /// Operation name.
        operation: String,
        /// Number of supplied arguments.
        arguments: usize,
    },

    /// The exported object has been dropped by its owner.
    #[error("object exported as '{0}' has been released")]
    ObjectReleased(ExportName),

    /// The underlying method failed.
    #[error("invocation of '{member}' failed")]
    Invocation {
        /// Attribute or operation name.
        member: String,
        /// Failure raised by the method.
        #[source]
        source: InvocationError,
    },
}

impl ManagementError {
    /// Wraps a failure raised by the underlying method.
    pub fn invocation(member: impl Into<String>, source: InvocationError) -> Self {
        Self::Invocation {
            member: member.into(),
            source,
        }
    }
}

fn display_kind(kind: &Option<ValueKind>) -> &'static str {
    kind.map_or("null", ValueKind::as_str)
}
