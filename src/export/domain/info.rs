//! Listing rows handed to the protocol server.

use super::{ExportId, ExportName};
use crate::reflect::domain::{TypeName, ValueType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One attribute as seen by a management client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Attribute name, exactly as derived from the accessor name.
    pub name: String,
    /// Declared value type.
    pub value_type: ValueType,
    /// Whether the attribute can be read.
    pub readable: bool,
    /// Whether the attribute can be written.
    pub writable: bool,
    /// Whether the read accessor uses the `is` prefix.
    pub is_is: bool,
    /// Optional description from the marker.
    pub description: Option<String>,
}

/// One operation overload as seen by a management client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationInfo {
    /// Operation name, verbatim.
    pub name: String,
    /// Ordered parameter types.
    pub parameter_types: Vec<ValueType>,
    /// Return type.
    pub return_type: ValueType,
    /// Optional description from the marker.
    pub description: Option<String>,
}

/// Summary of one exported object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Export identifier.
    pub id: ExportId,
    /// External name.
    pub name: ExportName,
    /// Name of the exported class.
    pub type_name: TypeName,
    /// When the export was created.
    pub exported_at: DateTime<Utc>,
    /// Number of attributes.
    pub attributes: usize,
    /// Number of operation overloads.
    pub operations: usize,
    /// Number of attribute declarations rejected at export time.
    pub rejected: usize,
    /// Whether the live object is still reachable.
    pub alive: bool,
}
