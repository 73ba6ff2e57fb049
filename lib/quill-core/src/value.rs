//! Untyped parameter values and their scalar string conversion.
//!
//! Every map-shaped parameter stores [`Value`]s. Encoders turn them into
//! strings with the scalar converter ([`Value::to_scalar_string`]), which
//! formats primitives the way a standard formatter does and yields an empty
//! string for anything that is not a scalar.
//!
//! # Example
//!
//! ```
//! use quill_core::Value;
//!
//! assert_eq!(Value::from(true).to_scalar_string(), "true");
//! assert_eq!(Value::from(3.5_f32).to_scalar_string(), "3.5");
//! assert_eq!(Value::from(-7).to_scalar_string(), "-7");
//! assert_eq!(Value::from(vec![1, 2]).to_scalar_string(), "");
//! ```

use std::fmt::Display;

use crate::{Error, Result};

/// A dynamically typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// Pointer-sized signed integer.
    ISize(isize),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// Pointer-sized unsigned integer.
    USize(usize),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// UTF-8 string.
    String(String),
    /// Sequence of values, expanded into repeated entries by query and form encoders.
    List(Vec<Value>),
}

/// How encoders treat values that have no scalar representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScalarMode {
    /// Non-scalar values become the empty string.
    #[default]
    Lenient,
    /// Non-scalar values fail with [`Error::UnsupportedValue`].
    Strict,
}

impl ScalarMode {
    /// Convert a value according to this mode.
    pub fn encode(self, value: &Value) -> Result<String> {
        match self {
            Self::Lenient => Ok(value.to_scalar_string()),
            Self::Strict => value.try_to_scalar_string(),
        }
    }
}

impl Value {
    /// Short name of the value shape.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I8(_)
            | Self::I16(_)
            | Self::I32(_)
            | Self::I64(_)
            | Self::ISize(_)
            | Self::U8(_)
            | Self::U16(_)
            | Self::U32(_)
            | Self::U64(_)
            | Self::USize(_) => "integer",
            Self::F32(_) | Self::F64(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Returns `true` for booleans, numbers and strings.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Null | Self::List(_))
    }

    /// The elements if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Values to emit for a repeated-key encoding: the elements of a list,
    /// or the value itself.
    pub fn expand(&self) -> impl Iterator<Item = &Value> {
        let items = match self {
            Self::List(items) => items.as_slice(),
            other => std::slice::from_ref(other),
        };
        items.iter()
    }

    /// Canonical string of a scalar value; empty for `Null` and `List`.
    #[must_use]
    pub fn to_scalar_string(&self) -> String {
        self.scalar().unwrap_or_default()
    }

    /// Canonical string of a scalar value, failing on `Null` and `List`.
    pub fn try_to_scalar_string(&self) -> Result<String> {
        self.scalar().ok_or(Error::UnsupportedValue(self.kind()))
    }

    fn scalar(&self) -> Option<String> {
        let s = match self {
            Self::Null | Self::List(_) => return None,
            Self::Bool(b) => b.to_string(),
            Self::I8(n) => n.to_string(),
            Self::I16(n) => n.to_string(),
            Self::I32(n) => n.to_string(),
            Self::I64(n) => n.to_string(),
            Self::ISize(n) => n.to_string(),
            Self::U8(n) => n.to_string(),
            Self::U16(n) => n.to_string(),
            Self::U32(n) => n.to_string(),
            Self::U64(n) => n.to_string(),
            Self::USize(n) => n.to_string(),
            Self::F32(f) => format_float(*f, f32::is_nan, f32::is_infinite, f32::is_sign_negative),
            Self::F64(f) => format_float(*f, f64::is_nan, f64::is_infinite, f64::is_sign_negative),
            Self::String(s) => s.clone(),
        };
        Some(s)
    }
}

// `Display` for floats already prints the shortest round-trip digits
// without exponent notation; only infinities differ.
fn format_float<F: Display + Copy>(
    value: F,
    is_nan: fn(F) -> bool,
    is_infinite: fn(F) -> bool,
    is_negative: fn(F) -> bool,
) -> String {
    if is_nan(value) {
        "NaN".to_string()
    } else if is_infinite(value) {
        let sign = if is_negative(value) { '-' } else { '+' };
        format!("{sign}Inf")
    } else {
        value.to_string()
    }
}

/// Convert a value with the lenient scalar converter.
#[must_use]
pub fn encode_scalar(value: &Value) -> String {
    value.to_scalar_string()
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => ISize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => USize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_bool() {
        assert_eq!(Value::from(true).to_scalar_string(), "true");
        assert_eq!(Value::from(false).to_scalar_string(), "false");
    }

    #[test]
    fn scalar_integers_all_widths() {
        assert_eq!(Value::from(-7_i8).to_scalar_string(), "-7");
        assert_eq!(Value::from(i16::MIN).to_scalar_string(), "-32768");
        assert_eq!(Value::from(-7).to_scalar_string(), "-7");
        assert_eq!(Value::from(i64::MAX).to_scalar_string(), "9223372036854775807");
        assert_eq!(Value::from(-1_isize).to_scalar_string(), "-1");
        assert_eq!(Value::from(255_u8).to_scalar_string(), "255");
        assert_eq!(Value::from(65535_u16).to_scalar_string(), "65535");
        assert_eq!(Value::from(42_u32).to_scalar_string(), "42");
        assert_eq!(Value::from(u64::MAX).to_scalar_string(), "18446744073709551615");
        assert_eq!(Value::from(0_usize).to_scalar_string(), "0");
    }

    #[test]
    fn scalar_floats_minimal_digits() {
        assert_eq!(Value::from(3.5_f32).to_scalar_string(), "3.5");
        assert_eq!(Value::from(0.1_f32).to_scalar_string(), "0.1");
        assert_eq!(Value::from(2.0_f64).to_scalar_string(), "2");
        assert_eq!(Value::from(-0.25_f64).to_scalar_string(), "-0.25");
        assert_eq!(Value::from(1e21_f64).to_scalar_string(), "1000000000000000000000");
        assert_eq!(Value::from(f64::INFINITY).to_scalar_string(), "+Inf");
        assert_eq!(Value::from(f32::NEG_INFINITY).to_scalar_string(), "-Inf");
        assert_eq!(Value::from(f64::NAN).to_scalar_string(), "NaN");
    }

    #[test]
    fn scalar_string_passthrough() {
        assert_eq!(Value::from("hello world").to_scalar_string(), "hello world");
        assert_eq!(Value::from(String::new()).to_scalar_string(), "");
    }

    #[test]
    fn scalar_unsupported_is_empty() {
        assert_eq!(Value::from(vec![1, 2, 3]).to_scalar_string(), "");
        assert_eq!(Value::Null.to_scalar_string(), "");
        assert_eq!(Value::from(None::<u32>).to_scalar_string(), "");
    }

    #[test]
    fn scalar_strict_rejects_non_scalars() {
        let err = Value::from(vec!["a"]).try_to_scalar_string().expect_err("list");
        assert!(matches!(err, Error::UnsupportedValue("list")));

        let err = ScalarMode::Strict.encode(&Value::Null).expect_err("null");
        assert!(matches!(err, Error::UnsupportedValue("null")));

        assert_eq!(ScalarMode::Strict.encode(&Value::from(1)).expect("int"), "1");
        assert_eq!(ScalarMode::Lenient.encode(&Value::Null).expect("lenient"), "");
    }

    #[test]
    fn scalar_is_pure() {
        let value = Value::from(12.75_f64);
        assert_eq!(value.to_scalar_string(), value.to_scalar_string());
        assert_eq!(encode_scalar(&value), "12.75");
    }

    #[test]
    fn expand_list_and_scalar() {
        let list = Value::from([1, 2, 3]);
        let expanded: Vec<String> = list.expand().map(Value::to_scalar_string).collect();
        assert_eq!(expanded, ["1", "2", "3"]);

        let single = Value::from("x");
        assert_eq!(single.expand().count(), 1);
        assert!(single.as_list().is_none());
    }

    #[test]
    fn value_kind() {
        assert_eq!(Value::from(1_u8).kind(), "integer");
        assert_eq!(Value::from(1.0_f32).kind(), "float");
        assert_eq!(Value::from("s").kind(), "string");
        assert!(Value::from(true).is_scalar());
        assert!(!Value::from(vec![true]).is_scalar());
    }
}
