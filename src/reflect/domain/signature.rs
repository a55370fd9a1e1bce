//! Method signatures: name plus ordered parameter types.

use super::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a method within a type, ignoring its return type.
///
/// Lookup by signature is exact; no widening or coercion between parameter
/// types is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    name: String,
    parameter_types: Vec<ValueType>,
}

impl MethodSignature {
    /// Creates a signature.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_types: impl IntoIterator<Item = ValueType>) -> Self {
        Self {
            name: name.into(),
            parameter_types: parameter_types.into_iter().collect(),
        }
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered parameter types.
    #[must_use]
    pub fn parameter_types(&self) -> &[ValueType] {
        &self.parameter_types
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Returns whether this signature has the given name and parameters.
    #[must_use]
    pub fn matches(&self, name: &str, parameter_types: &[ValueType]) -> bool {
        self.name == name && self.parameter_types == parameter_types
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, parameter) in self.parameter_types.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}
