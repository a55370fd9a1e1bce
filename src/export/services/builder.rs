//! Pairing of accessors into attributes and classification of operations.

use crate::export::domain::{
    AttributeDescriptor, BoundMethod, DescriptorSet, DiscoveryError, ExportConfig,
    OperationDescriptor,
};
use crate::reflect::domain::{ClassInfo, Managed, MethodSignature, ValueType};
use crate::reflect::services::ManageableSurface;
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// How a manageable method participates in the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Role {
    Read(String),
    Write(String),
    Operation,
}

#[derive(Debug, Clone)]
struct Accessor {
    method: BoundMethod,
    value_type: ValueType,
    marker: Managed,
}

/// Builds [`DescriptorSet`]s from scanned surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorBuilder {
    config: ExportConfig,
    instance: Option<(TypeId, &'static str)>,
}

impl DescriptorBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub const fn new(config: ExportConfig) -> Self {
        Self {
            config,
            instance: None,
        }
    }

    /// Requires every manageable implementation to accept instances of the
    /// class's Rust type. Classes without an instance type are not checked.
    #[must_use]
    pub fn for_instances_of(mut self, class: &ClassInfo) -> Self {
        self.instance = class.instance_type().zip(class.instance_type_name());
        self
    }

    /// Groups manageable methods into attributes and operations.
    ///
    /// `getX()` with a non-void return and `isX()` with a boolean return read
    /// attribute `X`; `setX(v)` writes it. Everything else is an operation
    /// keyed by its full signature.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::AbstractMethod`] when a manageable method has
    /// no implementation, and [`DiscoveryError::IncompatibleImplementation`]
    /// when it cannot run against the instance type set by
    /// [`Self::for_instances_of`]. Returns [`DiscoveryError::InconsistentDeclaration`]
    /// only under [`ExportConfig::fail_on_inconsistent_attribute`]; otherwise
    /// the offending attribute is dropped and recorded in
    /// [`DescriptorSet::rejected`].
    pub fn build(&self, surface: &ManageableSurface) -> Result<DescriptorSet, DiscoveryError> {
        let mut reads: BTreeMap<String, Vec<Accessor>> = BTreeMap::new();
        let mut writes: BTreeMap<String, Vec<Accessor>> = BTreeMap::new();
        let mut operations = BTreeMap::new();

        for manageable in surface.values() {
            let method = BoundMethod::bind(manageable.method(), self.instance)?;
            let marker = manageable.marker().clone();
            match classify(method.signature(), method.return_type()) {
                Role::Read(attribute) => {
                    let value_type = method.return_type();
                    reads.entry(attribute).or_default().push(Accessor {
                        method,
                        value_type,
                        marker,
                    });
                }
                Role::Write(attribute) => {
                    let value_type = method
                        .signature()
                        .parameter_types()
                        .first()
                        .copied()
                        .unwrap_or(ValueType::VOID);
                    writes.entry(attribute).or_default().push(Accessor {
                        method,
                        value_type,
                        marker,
                    });
                }
                Role::Operation => {
                    let description = marker.description().map(str::to_owned);
                    operations.insert(
                        method.signature().clone(),
                        OperationDescriptor::new(method, description),
                    );
                }
            }
        }

        let names: BTreeSet<String> = reads.keys().chain(writes.keys()).cloned().collect();
        let mut attributes = BTreeMap::new();
        let mut rejected = Vec::new();

        for name in names {
            let read = reads.remove(&name).unwrap_or_default();
            let write = writes.remove(&name).unwrap_or_default();
            match pair(&name, read, write) {
                Ok(descriptor) => {
                    attributes.insert(name, descriptor);
                }
                Err(err) if self.config.fail_on_inconsistent_attribute => return Err(err),
                Err(err) => {
                    warn!(attribute = %name, error = %err, "attribute rejected");
                    rejected.push(err);
                }
            }
        }

        debug!(
            attributes = attributes.len(),
            operations = operations.len(),
            rejected = rejected.len(),
            "built descriptors"
        );
        Ok(DescriptorSet::new(attributes, operations, rejected))
    }
}

fn classify(signature: &MethodSignature, return_type: ValueType) -> Role {
    let name = signature.name();
    let arity = signature.arity();

    if arity == 0 {
        if let Some(attribute) = property_name(name, "get")
            && !return_type.is_void()
        {
            return Role::Read(attribute.to_owned());
        }
        if let Some(attribute) = property_name(name, "is")
            && return_type.is_boolean()
        {
            return Role::Read(attribute.to_owned());
        }
    }

    if arity == 1
        && let Some(attribute) = property_name(name, "set")
    {
        return Role::Write(attribute.to_owned());
    }

    Role::Operation
}

/// Strips an accessor prefix, requiring the remainder to start with an
/// uppercase letter so that `settle(x)` stays an operation.
fn property_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)
        .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
}

fn pair(
    name: &str,
    reads: Vec<Accessor>,
    writes: Vec<Accessor>,
) -> Result<AttributeDescriptor, DiscoveryError> {
    let read = single_accessor(name, "read", reads)?;
    let write = single_accessor(name, "write", writes)?;

    if let (Some(read), Some(write)) = (&read, &write)
        && read.value_type != write.value_type
    {
        return Err(inconsistent(
            name,
            format!(
                "{} returns {} but {} accepts {}",
                read.method.signature(),
                read.value_type,
                write.method.signature(),
                write.value_type
            ),
        ));
    }

    let value_type = read
        .as_ref()
        .or(write.as_ref())
        .map(|accessor| accessor.value_type)
        .ok_or_else(|| inconsistent(name, "no accessor".to_owned()))?;
    let description = read
        .as_ref()
        .and_then(|accessor| accessor.marker.description())
        .or_else(|| write.as_ref().and_then(|accessor| accessor.marker.description()))
        .map(str::to_owned);

    Ok(AttributeDescriptor::new(
        name.to_owned(),
        value_type,
        read.map(|accessor| accessor.method),
        write.map(|accessor| accessor.method),
        description,
    ))
}

/// Collapses accessors of one direction to a single accessor.
///
/// `getX()` and `isX()` of the same type collapse to the `is` form; any
/// disagreement on the value type is an inconsistent declaration.
fn single_accessor(
    name: &str,
    direction: &str,
    mut accessors: Vec<Accessor>,
) -> Result<Option<Accessor>, DiscoveryError> {
    let Some(first) = accessors.first() else {
        return Ok(None);
    };
    if let Some(conflict) = accessors
        .iter()
        .find(|accessor| accessor.value_type != first.value_type)
    {
        return Err(inconsistent(
            name,
            format!(
                "conflicting {direction} accessors {} ({}) and {} ({})",
                first.method.signature(),
                first.value_type,
                conflict.method.signature(),
                conflict.value_type
            ),
        ));
    }
    let index = accessors
        .iter()
        .position(|accessor| accessor.method.name().starts_with("is"))
        .unwrap_or(0);
    Ok(Some(accessors.swap_remove(index)))
}

fn inconsistent(attribute: &str, reason: String) -> DiscoveryError {
    DiscoveryError::InconsistentDeclaration {
        attribute: attribute.to_owned(),
        reason,
    }
}
