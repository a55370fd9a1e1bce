//! Application services for exporting objects.

mod builder;
mod exporter;
pub mod invoker;

pub use builder::DescriptorBuilder;
pub use exporter::{ObjectExporter, ObjectExporterError, ObjectExporterResult};
