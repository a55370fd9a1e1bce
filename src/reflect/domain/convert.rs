//! Conversions between Rust values and [`Value`].

use super::{Value, ValueType};

/// A Rust type that can cross the management boundary.
///
/// The associated [`ValueType`] is what descriptors advertise; typed getters,
/// setters and operations use it to derive their signatures.
pub trait ManagedValue: Sized {
    /// Returns the declared type for values of `Self`.
    fn value_type() -> ValueType;

    /// Converts into a dynamic value.
    fn into_value(self) -> Value;

    /// Converts from a dynamic value, returning `None` on a kind mismatch.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_managed_value {
    ($ty:ty, $variant:ident, $declared:ident) => {
        impl ManagedValue for $ty {
            fn value_type() -> ValueType {
                ValueType::$declared
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_managed_value!(bool, Boolean, BOOLEAN);
impl_managed_value!(i8, Byte, BYTE);
impl_managed_value!(i16, Short, SHORT);
impl_managed_value!(i32, Int, INT);
impl_managed_value!(i64, Long, LONG);
impl_managed_value!(f32, Float, FLOAT);
impl_managed_value!(f64, Double, DOUBLE);
impl_managed_value!(String, String, STRING);

impl<T: ManagedValue> ManagedValue for Option<T> {
    fn value_type() -> ValueType {
        T::value_type().nullable()
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, T::into_value)
    }

    fn from_value(value: Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_value(value).map(Some)
    }
}

impl ManagedValue for Value {
    fn value_type() -> ValueType {
        ValueType::OBJECT.nullable()
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl ManagedValue for () {
    fn value_type() -> ValueType {
        ValueType::VOID
    }

    fn into_value(self) -> Value {
        Value::Null
    }

    fn from_value(value: Value) -> Option<Self> {
        value.is_null().then_some(())
    }
}
