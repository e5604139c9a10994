//! Conversion of tagged column values into record field types.

use crate::db::Value;
use crate::error::{MapperError, Result};

/// A field type that can be built from a column value.
///
/// `Ok(None)` means the value leaves the field untouched (NULL for plain
/// fields, and kinds the mapper does not handle).
pub trait FromValue: Sized {
    /// Type name reported in conversion errors.
    const TYPE_NAME: &'static str;

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>>;
}

/// Object-safe view of a settable record field.
///
/// Implemented for every [`FromValue`] type; records hand these out from
/// [`Record::field_mut`](super::Record::field_mut).
pub trait ColumnValue {
    /// Validates that `value` can be stored in this field without storing it.
    fn check(&self, column: &str, value: &Value) -> Result<()>;

    /// Stores `value` in this field. Returns false when the field was left unchanged.
    fn assign(&mut self, column: &str, value: &Value) -> Result<bool>;
}

impl<T: FromValue> ColumnValue for T {
    fn check(&self, column: &str, value: &Value) -> Result<()> {
        T::from_value(column, value).map(|_| ())
    }

    fn assign(&mut self, column: &str, value: &Value) -> Result<bool> {
        match T::from_value(column, value)? {
            Some(converted) => {
                *self = converted;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Handles the kinds every plain field treats the same way.
fn skip_or_mismatch<T>(column: &str, expected: &'static str, value: &Value) -> Result<Option<T>> {
    match value {
        Value::Null | Value::Other(_) => Ok(None),
        other => Err(MapperError::conversion(column, expected, other.kind())),
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::String(s) => Ok(Some(s.clone())),
            other => skip_or_mismatch(column, Self::TYPE_NAME, other),
        }
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Bool(b) => Ok(Some(*b)),
            other => skip_or_mismatch(column, Self::TYPE_NAME, other),
        }
    }
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Float(f) => Ok(Some(*f)),
            other => skip_or_mismatch(column, Self::TYPE_NAME, other),
        }
    }
}

impl FromValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Float(f) => Ok(Some(*f as f32)),
            other => skip_or_mismatch(column, Self::TYPE_NAME, other),
        }
    }
}

impl FromValue for Vec<u8> {
    const TYPE_NAME: &'static str = "Vec<u8>";

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Bytes(b) => Ok(Some(b.clone())),
            other => skip_or_mismatch(column, Self::TYPE_NAME, other),
        }
    }
}

// Integers narrower than i64 (and unsigned ones) are range checked.
macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i).map(Some).map_err(|_| {
                            MapperError::conversion(
                                column,
                                Self::TYPE_NAME,
                                format!("integer {i} (out of range)"),
                            )
                        }),
                        other => skip_or_mismatch(column, Self::TYPE_NAME, other),
                    }
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// NULL clears an optional field instead of leaving it alone.
impl<T: FromValue> FromValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_value(column: &str, value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(Some(None));
        }
        Ok(T::from_value(column, value)?.map(Some))
    }
}
