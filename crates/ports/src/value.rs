//! Tagged key/value payloads.
//!
//! A [`Value`] is captured at the call site and rendered later by a
//! formatter. Two renderings exist:
//!
//! - `Serialize` yields the JSON encoding. Non-finite floats and
//!   [`Value::Invalid`] refuse to serialize so the JSON formatter can drop
//!   the offending pair.
//! - `Display` yields the default human-readable form used by the text
//!   formatter. It never fails.

use crate::finite::FiniteCheck;
use serde::ser::{Error as _, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A single key or value in a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text.
    Str(Box<str>),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Absent value.
    Null,
    /// Arbitrary serialized data.
    Json(serde_json::Value),
    /// Data that failed to serialize at capture time, with the reason.
    Invalid(Box<str>),
}

impl Value {
    /// Capture any serializable value.
    ///
    /// Serialization failures (non-string map keys, non-finite floats,
    /// failing `Serialize` impls) produce [`Value::Invalid`] instead of an
    /// error.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        let captured = value
            .serialize(FiniteCheck)
            .and_then(|()| serde_json::to_value(value));
        match captured {
            Ok(json) => Self::Json(json),
            Err(error) => Self::Invalid(error.to_string().into_boxed_str()),
        }
    }

    /// Capture the `Display` output of any value as text.
    pub fn display(value: &(impl fmt::Display + ?Sized)) -> Self {
        Self::Str(value.to_string().into_boxed_str())
    }

    /// Returns true when the value has a JSON encoding.
    #[must_use]
    pub const fn is_marshalable(&self) -> bool {
        match self {
            Self::Float(number) => number.is_finite(),
            Self::Invalid(_) => false,
            _ => true,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(text) => serializer.serialize_str(text),
            Self::Int(number) => serializer.serialize_i64(*number),
            Self::Uint(number) => serializer.serialize_u64(*number),
            Self::Float(number) if number.is_finite() => match integral(*number) {
                Some(whole) => serializer.serialize_i64(whole),
                None => serializer.serialize_f64(*number),
            },
            Self::Float(number) => Err(S::Error::custom(format_args!(
                "unsupported value: {number}"
            ))),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Null => serializer.serialize_unit(),
            Self::Json(json) => json.serialize(serializer),
            Self::Invalid(reason) => Err(S::Error::custom(reason)),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact in an `i64`.
const EXACT_INTEGRAL_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Whole-number floats encode without a fractional part, as `3` not `3.0`.
/// Negative zero keeps its float encoding.
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    reason = "the value is checked integral and within exact i64 range first"
)]
fn integral(number: f64) -> Option<i64> {
    let whole = number.trunc() == number && number.abs() < EXACT_INTEGRAL_LIMIT;
    (whole && !(number == 0.0 && number.is_sign_negative())).then(|| number as i64)
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => formatter.write_str(text),
            Self::Int(number) => fmt::Display::fmt(number, formatter),
            Self::Uint(number) => fmt::Display::fmt(number, formatter),
            Self::Float(number) => fmt::Display::fmt(number, formatter),
            Self::Bool(flag) => fmt::Display::fmt(flag, formatter),
            Self::Null => formatter.write_str("<nil>"),
            Self::Json(serde_json::Value::String(text)) => formatter.write_str(text),
            Self::Json(json) => fmt::Display::fmt(json, formatter),
            Self::Invalid(reason) => write!(formatter, "%!v({reason})"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into_boxed_str())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.as_str().into())
    }
}

impl From<Box<str>> for Value {
    fn from(value: Box<str>) -> Self {
        Self::Str(value)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Str(value.into_owned().into_boxed_str())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Str(value.to_string().into_boxed_str())
    }
}

macro_rules! impl_from_lossless {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_lossless!(Int(i64): i8, i16, i32, i64);
impl_from_lossless!(Uint(u64): u8, u16, u32, u64);
impl_from_lossless!(Float(f64): f32, f64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::display(&value), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::display(&value), Self::Uint)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Build a flat key/value array, converting each element with [`Value::from`].
///
/// ```
/// use kvlog_ports::{Value, kvs};
///
/// let keyvalues = kvs!["port", 8080, "tls", false];
/// assert_eq!(keyvalues[1], Value::Int(8080));
/// ```
#[macro_export]
macro_rules! kvs {
    () => {{
        let empty: [$crate::Value; 0] = [];
        empty
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn scalars_serialize_as_json() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Value::from("port"))?, "\"port\"");
        assert_eq!(serde_json::to_string(&Value::from(8080))?, "8080");
        assert_eq!(serde_json::to_string(&Value::from(-3_i8))?, "-3");
        assert_eq!(serde_json::to_string(&Value::from(1.5))?, "1.5");
        assert_eq!(serde_json::to_string(&Value::from(3.0))?, "3");
        assert_eq!(serde_json::to_string(&Value::from(-42.0_f32))?, "-42");
        assert_eq!(serde_json::to_string(&Value::from(-0.0))?, "-0.0");
        assert_eq!(serde_json::to_string(&Value::from(1.0e300))?, "1e300");
        assert_eq!(serde_json::to_string(&Value::from(true))?, "true");
        assert_eq!(serde_json::to_string(&Value::from(None::<u8>))?, "null");
        Ok(())
    }

    #[test]
    fn non_finite_floats_refuse_to_serialize() {
        for number in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let value = Value::from(number);
            assert!(!value.is_marshalable());
            assert!(serde_json::to_string(&value).is_err());
        }
    }

    #[test]
    fn unserializable_data_is_captured_as_invalid() {
        let mut map = BTreeMap::new();
        map.insert(vec![1_u8], "tuple keys are not JSON");
        let value = Value::from_serialize(&map);

        assert!(matches!(value, Value::Invalid(_)));
        assert!(serde_json::to_string(&value).is_err());
        assert!(value.to_string().starts_with("%!v("));
    }

    #[test]
    fn non_finite_floats_are_invalid_at_capture() {
        #[derive(serde::Serialize)]
        struct Sample {
            ratio: f64,
        }

        for value in [
            Value::from_serialize(&f64::NAN),
            Value::from_serialize(&Sample {
                ratio: f64::INFINITY,
            }),
            Value::from_serialize(&[1.0_f32, f32::NEG_INFINITY]),
        ] {
            assert!(!value.is_marshalable(), "captured {value:?}");
            assert!(serde_json::to_string(&value).is_err());
        }
        assert_eq!(
            Value::from_serialize(&Sample { ratio: 0.25 }),
            Value::Json(json!({"ratio": 0.25}))
        );
    }

    #[test]
    fn serializable_data_keeps_structure() -> Result<(), serde_json::Error> {
        #[derive(serde::Serialize)]
        struct Peer {
            host: &'static str,
            port: u16,
        }

        let value = Value::from_serialize(&Peer {
            host: "db",
            port: 5432,
        });
        assert_eq!(value, Value::Json(json!({"host": "db", "port": 5432})));
        assert_eq!(serde_json::to_string(&value)?, r#"{"host":"db","port":5432}"#);
        assert_eq!(value.to_string(), r#"{"host":"db","port":5432}"#);
        Ok(())
    }

    #[test]
    fn display_uses_default_text_forms() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::from(8080).to_string(), "8080");
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "<nil>");
        assert_eq!(Value::from(json!("text")).to_string(), "text");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
    }


    #[test]
    fn kvs_macro_builds_flat_arrays() {
        let empty = crate::kvs![];
        assert!(empty.is_empty());

        let keyvalues = crate::kvs!["user", String::from("ana"), "retries", 3_u32, "ok", true,];
        assert_eq!(keyvalues.len(), 6);
        assert_eq!(keyvalues[1], Value::Str("ana".into()));
        assert_eq!(keyvalues[3], Value::Uint(3));
        assert_eq!(keyvalues[5], Value::Bool(true));
    }
}
