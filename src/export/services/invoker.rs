//! Dynamic get, set and invoke against an exported object.
//!
//! Every function resolves the member from the immutable descriptors first,
//! then upgrades the weak reference for the duration of the call. Methods
//! that were not marked, or that the scanner discarded as generated, have no
//! descriptor and are therefore unreachable here.

use crate::export::domain::{
    AttributeDescriptor, ManagedObject, ManagementError, ManagementResult, OperationDescriptor,
};
use crate::reflect::domain::{MethodSignature, Value, ValueType};

/// Reads an attribute.
///
/// # Errors
///
/// Returns [`ManagementError::AttributeNotFound`] when the attribute does not
/// exist or is write-only, [`ManagementError::ObjectReleased`] when the
/// object is gone, and [`ManagementError::Invocation`] when the accessor
/// fails.
pub fn get_attribute(object: &ManagedObject, attribute: &str) -> ManagementResult<Value> {
    let read = object
        .descriptors()
        .attribute(attribute)
        .and_then(AttributeDescriptor::read_method)
        .ok_or_else(|| ManagementError::AttributeNotFound(attribute.to_owned()))?;
    let target = object.target()?;
    read.invoke(&*target, &[])
        .map_err(|source| ManagementError::invocation(attribute, source))
}

/// Writes an attribute.
///
/// # Errors
///
/// Returns [`ManagementError::AttributeNotFound`] when the attribute does not
/// exist or is read-only, [`ManagementError::InvalidValue`] when `value` is
/// not assignable to the declared type, [`ManagementError::ObjectReleased`]
/// when the object is gone, and [`ManagementError::Invocation`] when the
/// accessor fails.
pub fn set_attribute(object: &ManagedObject, attribute: &str, value: Value) -> ManagementResult<()> {
    let descriptor = object
        .descriptors()
        .attribute(attribute)
        .filter(|descriptor| descriptor.is_writable())
        .ok_or_else(|| ManagementError::AttributeNotFound(attribute.to_owned()))?;
    let write = descriptor
        .write_method()
        .ok_or_else(|| ManagementError::AttributeNotFound(attribute.to_owned()))?;

    ensure_assignable(attribute, descriptor.value_type(), &value)?;

    let target = object.target()?;
    write
        .invoke(&*target, &[value])
        .map(drop)
        .map_err(|source| ManagementError::invocation(attribute, source))
}

/// Invokes an operation, choosing the overload from the runtime kinds of
/// `args`.
///
/// An overload whose parameter kinds match the arguments exactly is
/// preferred; otherwise the first overload, in signature order, that accepts
/// every argument is used.
///
/// # Errors
///
/// Returns [`ManagementError::OperationNotFound`] when no overload accepts
/// the arguments, [`ManagementError::ObjectReleased`] when the object is
/// gone, and [`ManagementError::Invocation`] when the method fails.
pub fn invoke_operation(
    object: &ManagedObject,
    operation: &str,
    args: &[Value],
) -> ManagementResult<Value> {
    let candidates: Vec<&OperationDescriptor> = object
        .descriptors()
        .overloads(operation)
        .filter(|candidate| candidate.parameter_types().len() == args.len())
        .collect();

    let chosen = candidates
        .iter()
        .find(|candidate| matches_exactly(candidate.parameter_types(), args))
        .or_else(|| {
            candidates
                .iter()
                .find(|candidate| accepts_all(candidate.parameter_types(), args))
        })
        .ok_or_else(|| ManagementError::OperationNotFound {
            operation: operation.to_owned(),
            arguments: args.len(),
        })?;

    call(object, chosen, args)
}

/// Invokes the overload named by an explicit signature.
///
/// # Errors
///
/// Returns [`ManagementError::OperationNotFound`] when no overload has this
/// exact signature or the argument count differs,
/// [`ManagementError::InvalidValue`] when an argument is not assignable to
/// its parameter, [`ManagementError::ObjectReleased`] when the object is
/// gone, and [`ManagementError::Invocation`] when the method fails.
pub fn invoke_operation_with_signature(
    object: &ManagedObject,
    operation: &str,
    args: &[Value],
    signature: &[ValueType],
) -> ManagementResult<Value> {
    let not_found = || ManagementError::OperationNotFound {
        operation: operation.to_owned(),
        arguments: args.len(),
    };
    let key = MethodSignature::new(operation, signature.iter().copied());
    let descriptor = object.descriptors().operation(&key).ok_or_else(not_found)?;
    if signature.len() != args.len() {
        return Err(not_found());
    }
    for (parameter, arg) in signature.iter().zip(args) {
        ensure_assignable(operation, *parameter, arg)?;
    }
    call(object, descriptor, args)
}

fn call(object: &ManagedObject, descriptor: &OperationDescriptor, args: &[Value]) -> ManagementResult<Value> {
    let target = object.target()?;
    descriptor
        .method()
        .invoke(&*target, args)
        .map_err(|source| ManagementError::invocation(descriptor.name(), source))
}

fn ensure_assignable(member: &str, expected: ValueType, value: &Value) -> ManagementResult<()> {
    if expected.accepts(value) {
        return Ok(());
    }
    Err(ManagementError::InvalidValue {
        member: member.to_owned(),
        expected,
        actual: value.kind(),
    })
}

fn matches_exactly(parameters: &[ValueType], args: &[Value]) -> bool {
    parameters.iter().zip(args).all(|(parameter, arg)| match arg.kind() {
        Some(kind) => kind == parameter.kind(),
        None => parameter.is_nullable(),
    })
}

fn accepts_all(parameters: &[ValueType], args: &[Value]) -> bool {
    parameters
        .iter()
        .zip(args)
        .all(|(parameter, arg)| parameter.accepts(arg))
}
