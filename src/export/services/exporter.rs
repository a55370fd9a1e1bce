//! Service layer for exporting objects and serving management requests.
//!
//! Provides [`ObjectExporter`], the surface a protocol server talks to:
//! export and unexport, listing, and get/set/invoke by external name.

use crate::export::{
    domain::{
        AttributeInfo, DiscoveryError, ExportConfig, ExportDomainError, ExportName, ExportSummary,
        ManagedObject, ManagementError, OperationInfo,
    },
    ports::{ManagedObjectRepository, ManagedObjectRepositoryError},
    services::{DescriptorBuilder, invoker},
};
use crate::reflect::domain::{ClassInfo, Value, ValueType};
use crate::reflect::services::SurfaceScanner;
use mockable::Clock;
use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};
use thiserror::Error;
use tracing::info;

/// Service-level errors for export and management operations.
#[derive(Debug, Error)]
pub enum ObjectExporterError {
    /// Name validation failed.
    #[error(transparent)]
    Domain(#[from] ExportDomainError),
    /// The type's manageable surface could not be exported.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ManagedObjectRepositoryError),
    /// A management request was rejected or the underlying method failed.
    #[error(transparent)]
    Management(#[from] ManagementError),
    /// No object is exported under the given name.
    #[error("no object exported as '{0}'")]
    InstanceNotFound(ExportName),
}

/// Result type for exporter operations.
pub type ObjectExporterResult<T> = Result<T, ObjectExporterError>;

/// Export and management orchestration service.
pub struct ObjectExporter<R, C>
where
    R: ManagedObjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: ExportConfig,
}

impl<R, C> Clone for ObjectExporter<R, C>
where
    R: ManagedObjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<R, C> ObjectExporter<R, C>
where
    R: ManagedObjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates an exporter with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: ExportConfig::default(),
        }
    }

    /// Replaces the export configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the export configuration.
    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports `object`, described by `class`, under `name`.
    ///
    /// Descriptors are fully built before the name becomes visible. The
    /// exporter keeps only a weak reference; the caller stays the owner.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::Domain`] for an invalid name,
    /// [`ObjectExporterError::Discovery`] when `class` cannot describe
    /// `object`, declares an unimplemented manageable method, or binds an
    /// implementation written for another Rust type, and
    /// [`ObjectExporterError::Repository`] when the name is taken.
    pub fn export<T>(
        &self,
        name: &str,
        class: &ClassInfo,
        object: &Arc<T>,
    ) -> ObjectExporterResult<Arc<ManagedObject>>
    where
        T: Any + Send + Sync,
    {
        let export_name = ExportName::new(name)?;
        ensure_describes::<T>(class)?;

        let scanner = if self.config.memoize_markers {
            SurfaceScanner::new()
        } else {
            SurfaceScanner::without_memoization()
        };
        let surface = scanner.scan(class);
        let descriptors = DescriptorBuilder::new(self.config)
            .for_instances_of(class)
            .build(&surface)?;

        let weak: Weak<T> = Arc::downgrade(object);
        let target: Weak<dyn Any + Send + Sync> = weak;
        let managed = Arc::new(ManagedObject::new(
            export_name,
            class.name().clone(),
            target,
            descriptors,
            &*self.clock,
        ));
        self.repository.insert(Arc::clone(&managed))?;

        info!(
            name = %managed.name(),
            type_name = %managed.type_name(),
            attributes = managed.descriptors().attribute_count(),
            operations = managed.descriptors().operation_count(),
            "exported object"
        );
        Ok(managed)
    }

    /// Removes the export registered under `name`.
    ///
    /// The live object is unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] when nothing is
    /// exported under `name`.
    pub fn unexport(&self, name: &str) -> ObjectExporterResult<Arc<ManagedObject>> {
        let export_name = ExportName::new(name)?;
        let removed = self
            .repository
            .remove(&export_name)?
            .ok_or_else(|| ObjectExporterError::InstanceNotFound(export_name.clone()))?;
        info!(name = %export_name, "unexported object");
        Ok(removed)
    }

    /// Finds the export registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns name validation or repository errors.
    pub fn find(&self, name: &str) -> ObjectExporterResult<Option<Arc<ManagedObject>>> {
        let export_name = ExportName::new(name)?;
        Ok(self.repository.find_by_name(&export_name)?)
    }

    /// Summarises every export, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub fn list_exports(&self) -> ObjectExporterResult<Vec<ExportSummary>> {
        Ok(self
            .repository
            .list_all()?
            .iter()
            .map(|object| object.summary())
            .collect())
    }

    /// Lists the attributes of the export under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] when nothing is
    /// exported under `name`.
    pub fn list_attributes(&self, name: &str) -> ObjectExporterResult<Vec<AttributeInfo>> {
        Ok(self.lookup(name)?.attribute_info())
    }

    /// Lists the operation overloads of the export under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] when nothing is
    /// exported under `name`.
    pub fn list_operations(&self, name: &str) -> ObjectExporterResult<Vec<OperationInfo>> {
        Ok(self.lookup(name)?.operation_info())
    }

    /// Reads an attribute of the export under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] for an unknown
    /// export and [`ObjectExporterError::Management`] for request failures.
    pub fn get_attribute(&self, name: &str, attribute: &str) -> ObjectExporterResult<Value> {
        let object = self.lookup(name)?;
        Ok(invoker::get_attribute(&object, attribute)?)
    }

    /// Writes an attribute of the export under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] for an unknown
    /// export and [`ObjectExporterError::Management`] for request failures.
    pub fn set_attribute(&self, name: &str, attribute: &str, value: Value) -> ObjectExporterResult<()> {
        let object = self.lookup(name)?;
        Ok(invoker::set_attribute(&object, attribute, value)?)
    }

    /// Invokes an operation of the export under `name`, choosing the overload
    /// from the argument kinds.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] for an unknown
    /// export and [`ObjectExporterError::Management`] for request failures.
    pub fn invoke_operation(
        &self,
        name: &str,
        operation: &str,
        args: &[Value],
    ) -> ObjectExporterResult<Value> {
        let object = self.lookup(name)?;
        Ok(invoker::invoke_operation(&object, operation, args)?)
    }

    /// Invokes the overload with an explicit signature.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectExporterError::InstanceNotFound`] for an unknown
    /// export and [`ObjectExporterError::Management`] for request failures.
    pub fn invoke_operation_with_signature(
        &self,
        name: &str,
        operation: &str,
        args: &[Value],
        signature: &[ValueType],
    ) -> ObjectExporterResult<Value> {
        let object = self.lookup(name)?;
        Ok(invoker::invoke_operation_with_signature(
            &object, operation, args, signature,
        )?)
    }

    fn lookup(&self, name: &str) -> ObjectExporterResult<Arc<ManagedObject>> {
        let export_name = ExportName::new(name)?;
        self.repository
            .find_by_name(&export_name)?
            .ok_or(ObjectExporterError::InstanceNotFound(export_name))
    }
}

fn ensure_describes<T: Any>(class: &ClassInfo) -> Result<(), DiscoveryError> {
    if class.is_interface() {
        return Err(DiscoveryError::NotAClass(class.name().clone()));
    }
    let (Some(expected), Some(expected_name)) = (class.instance_type(), class.instance_type_name())
    else {
        return Err(DiscoveryError::NotInstantiable(class.name().clone()));
    };
    if expected != TypeId::of::<T>() {
        return Err(DiscoveryError::TypeMismatch {
            type_name: class.name().clone(),
            expected: expected_name,
            actual: std::any::type_name::<T>(),
        });
    }
    Ok(())
}
