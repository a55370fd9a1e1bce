//! The registry entry binding descriptors to a live object.

use super::{
    AttributeInfo, DescriptorSet, ExportId, ExportName, ExportSummary, ManagementError,
    ManagementResult, OperationInfo,
};
use crate::reflect::domain::TypeName;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::any::Any;
use std::sync::{Arc, Weak};

/// An exported object.
///
/// The entry observes the live object through a [`Weak`] reference and never
/// extends its lifetime. Once the owner drops the object, every request
/// fails with [`ManagementError::ObjectReleased`]. The entry adds no locking
/// around the object: concurrent requests are as safe as the object's own
/// interior synchronisation.
#[derive(Debug)]
pub struct ManagedObject {
    id: ExportId,
    name: ExportName,
    type_name: TypeName,
    target: Weak<dyn Any + Send + Sync>,
    descriptors: DescriptorSet,
    exported_at: DateTime<Utc>,
}

impl ManagedObject {
    /// Creates an entry for a freshly exported object.
    #[must_use]
    pub fn new(
        name: ExportName,
        type_name: TypeName,
        target: Weak<dyn Any + Send + Sync>,
        descriptors: DescriptorSet,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ExportId::new(),
            name,
            type_name,
            target,
            descriptors,
            exported_at: clock.utc(),
        }
    }

    /// Returns the export identifier.
    #[must_use]
    pub const fn id(&self) -> ExportId {
        self.id
    }

    /// Returns the external name.
    #[must_use]
    pub const fn name(&self) -> &ExportName {
        &self.name
    }

    /// Returns the name of the exported class.
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Returns the descriptors.
    #[must_use]
    pub const fn descriptors(&self) -> &DescriptorSet {
        &self.descriptors
    }

    /// Returns the export timestamp.
    #[must_use]
    pub const fn exported_at(&self) -> DateTime<Utc> {
        self.exported_at
    }

    /// Returns whether the live object still exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Upgrades the weak reference for the duration of one request.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::ObjectReleased`] when the owner has dropped
    /// the object.
    pub fn target(&self) -> ManagementResult<Arc<dyn Any + Send + Sync>> {
        self.target
            .upgrade()
            .ok_or_else(|| ManagementError::ObjectReleased(self.name.clone()))
    }

    /// Lists attributes in name order.
    #[must_use]
    pub fn attribute_info(&self) -> Vec<AttributeInfo> {
        self.descriptors
            .attributes()
            .map(|attribute| AttributeInfo {
                name: attribute.name().to_owned(),
                value_type: attribute.value_type(),
                readable: attribute.is_readable(),
                writable: attribute.is_writable(),
                is_is: attribute.is_is_accessor(),
                description: attribute.description().map(str::to_owned),
            })
            .collect()
    }

    /// Lists operation overloads in signature order.
    #[must_use]
    pub fn operation_info(&self) -> Vec<OperationInfo> {
        self.descriptors
            .operations()
            .map(|operation| OperationInfo {
                name: operation.name().to_owned(),
                parameter_types: operation.parameter_types().to_vec(),
                return_type: operation.return_type(),
                description: operation.description().map(str::to_owned),
            })
            .collect()
    }

    /// Summarises the entry.
    #[must_use]
    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            id: self.id,
            name: self.name.clone(),
            type_name: self.type_name.clone(),
            exported_at: self.exported_at,
            attributes: self.descriptors.attribute_count(),
            operations: self.descriptors.operation_count(),
            rejected: self.descriptors.rejected().len(),
            alive: self.is_alive(),
        }
    }
}
