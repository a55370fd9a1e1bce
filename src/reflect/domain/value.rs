//! Dynamically typed values exchanged with management clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a value independent of nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// No value; only valid as a return type.
    Void,
    /// Boolean flag.
    Boolean,
    /// Signed 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Long,
    /// 32-bit IEEE 754 float.
    Float,
    /// 64-bit IEEE 754 float.
    Double,
    /// UTF-8 text.
    String,
    /// Any non-void value.
    Object,
}

impl ValueKind {
    /// Returns the canonical lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of an attribute, parameter or return value.
///
/// A non-nullable type is the "required primitive" form and rejects
/// [`Value::Null`]; the nullable form accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValueType {
    kind: ValueKind,
    nullable: bool,
}

impl ValueType {
    /// The void return type.
    pub const VOID: Self = Self::required(ValueKind::Void);
    /// Required boolean.
    pub const BOOLEAN: Self = Self::required(ValueKind::Boolean);
    /// Required byte.
    pub const BYTE: Self = Self::required(ValueKind::Byte);
    /// Required short.
    pub const SHORT: Self = Self::required(ValueKind::Short);
    /// Required int.
    pub const INT: Self = Self::required(ValueKind::Int);
    /// Required long.
    pub const LONG: Self = Self::required(ValueKind::Long);
    /// Required float.
    pub const FLOAT: Self = Self::required(ValueKind::Float);
    /// Required double.
    pub const DOUBLE: Self = Self::required(ValueKind::Double);
    /// Required string.
    pub const STRING: Self = Self::required(ValueKind::String);
    /// Required object.
    pub const OBJECT: Self = Self::required(ValueKind::Object);

    /// Creates a non-nullable type of the given kind.
    #[must_use]
    pub const fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Returns the nullable form of this type.
    ///
    /// `void` stays non-nullable.
    #[must_use]
    pub const fn nullable(self) -> Self {
        Self {
            kind: self.kind,
            nullable: !matches!(self.kind, ValueKind::Void),
        }
    }

    /// Returns the kind of this type.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        self.kind
    }

    /// Returns whether [`Value::Null`] is an acceptable value.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        self.nullable
    }

    /// Returns whether this is the void type.
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(self.kind, ValueKind::Void)
    }

    /// Returns whether this type is boolean in either its required or
    /// nullable form.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self.kind, ValueKind::Boolean)
    }

    /// Returns whether `value` may be assigned to a slot of this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match value.kind() {
            None => self.nullable,
            Some(_) if self.kind == ValueKind::Object => true,
            Some(kind) => kind == self.kind,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            f.write_str(self.kind.as_str())
        }
    }
}

/// A dynamically typed value.
///
/// Float comparison is bitwise, so `NaN == NaN` holds and `0.0 != -0.0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean flag.
    Boolean(bool),
    /// Signed 8-bit integer.
    Byte(i8),
    /// Signed 16-bit integer.
    Short(i16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// UTF-8 text.
    String(String),
}

impl Value {
    /// Returns the runtime kind, or `None` for [`Value::Null`].
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Boolean(_) => Some(ValueKind::Boolean),
            Self::Byte(_) => Some(ValueKind::Byte),
            Self::Short(_) => Some(ValueKind::Short),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Long(_) => Some(ValueKind::Long),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Double(_) => Some(ValueKind::Double),
            Self::String(_) => Some(ValueKind::String),
        }
    }

    /// Returns whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}
