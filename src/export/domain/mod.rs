//! Domain model for exported objects.
//!
//! Descriptors are built once at export time and are immutable afterwards;
//! an exported entry only observes its live object through a weak
//! reference.

mod config;
mod descriptor;
mod error;
mod ids;
mod info;
mod managed_object;
mod name;

pub use config::ExportConfig;
pub use descriptor::{AttributeDescriptor, BoundMethod, DescriptorSet, OperationDescriptor};
pub use error::{DiscoveryError, ExportDomainError, ManagementError, ManagementResult};
pub use ids::ExportId;
pub use info::{AttributeInfo, ExportSummary, OperationInfo};
pub use managed_object::ManagedObject;
pub use name::ExportName;
