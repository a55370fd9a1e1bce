//! Domain model for type metadata.
//!
//! Values, value types, method signatures, markers and class descriptions.
//! Everything here is immutable once built and safe to share across threads.

mod class;
mod convert;
mod error;
mod marker;
mod method;
mod signature;
mod value;

pub use class::{ClassBuilder, ClassInfo, ClassKind, ReflectedMethod, TypeName};
pub use convert::ManagedValue;
pub use error::{InvocationError, InvocationResult, ReflectDomainError};
pub use marker::Managed;
pub use method::{Args, MethodFlags, MethodInfo, MethodInvoker};
pub use signature::MethodSignature;
pub use value::{Value, ValueKind, ValueType};
