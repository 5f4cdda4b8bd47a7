//! value
//!
//! The comparable value type that keys every derived lookup table.
//!
//! # Why not `serde_json::Value`
//!
//! Derived tables map an entry's `value` to other fields of the same entry,
//! so values must be usable as map keys. `serde_json::Value` is not `Eq` or
//! `Hash`; [`EnumValue`] mirrors its shape while providing both, with object
//! contents held in a `BTreeMap` so hashing is order-independent.
//!
//! # Example
//!
//! ```
//! use enumtable::EnumValue;
//! use serde_json::json;
//!
//! // Scalar conversions
//! let n = EnumValue::from(42);
//! assert_eq!(n.as_i64(), Some(42));
//!
//! // Total conversion from JSON, in both directions
//! let v = EnumValue::from(json!({ "code": 7, "tags": ["a", "b"] }));
//! assert_eq!(serde_json::Value::from(v.clone()), json!({ "code": 7, "tags": ["a", "b"] }));
//!
//! // Integer representations compare equal across widths
//! assert_eq!(EnumValue::from(1u32), EnumValue::from(1i64));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A comparable enumeration value.
///
/// Covers every JSON shape so that conversion from [`serde_json::Value`] is
/// total. `Null` exists for that totality and for nested nulls; an entry
/// whose own value normalizes to `Null` fails construction
/// (see [`DefinitionError::MissingValue`](crate::DefinitionError)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<EnumValue>),
    Object(BTreeMap<String, EnumValue>),
}

impl EnumValue {
    /// Create a value from a float.
    ///
    /// Returns `None` for NaN and infinities, which have no JSON number
    /// representation.
    ///
    /// # Example
    ///
    /// ```
    /// use enumtable::EnumValue;
    ///
    /// assert!(EnumValue::from_f64(2.5).is_some());
    /// assert!(EnumValue::from_f64(f64::NAN).is_none());
    /// ```
    pub fn from_f64(f: f64) -> Option<Self> {
        Number::from_f64(f).map(EnumValue::Number)
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, EnumValue::Null)
    }

    /// Get the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnumValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an `i64`, if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EnumValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Get the value as a bool, if it is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnumValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Value> for EnumValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => EnumValue::Null,
            Value::Bool(b) => EnumValue::Bool(b),
            Value::Number(n) => EnumValue::Number(n),
            Value::String(s) => EnumValue::String(s),
            Value::Array(items) => {
                EnumValue::Array(items.into_iter().map(EnumValue::from).collect())
            }
            Value::Object(map) => EnumValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, EnumValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        match value {
            EnumValue::Null => Value::Null,
            EnumValue::Bool(b) => Value::Bool(b),
            EnumValue::Number(n) => Value::Number(n),
            EnumValue::String(s) => Value::String(s),
            EnumValue::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            EnumValue::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<bool> for EnumValue {
    fn from(b: bool) -> Self {
        EnumValue::Bool(b)
    }
}

impl From<i32> for EnumValue {
    fn from(n: i32) -> Self {
        EnumValue::Number(Number::from(n))
    }
}

impl From<i64> for EnumValue {
    fn from(n: i64) -> Self {
        EnumValue::Number(Number::from(n))
    }
}

impl From<u32> for EnumValue {
    fn from(n: u32) -> Self {
        EnumValue::Number(Number::from(n))
    }
}

impl From<u64> for EnumValue {
    fn from(n: u64) -> Self {
        EnumValue::Number(Number::from(n))
    }
}

impl From<Number> for EnumValue {
    fn from(n: Number) -> Self {
        EnumValue::Number(n)
    }
}

impl From<&str> for EnumValue {
    fn from(s: &str) -> Self {
        EnumValue::String(s.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(s: String) -> Self {
        EnumValue::String(s)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}
