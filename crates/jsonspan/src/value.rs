//! The dynamic JSON value representation.
//!
//! [`Value`] is what [`read_dynamic`](crate::JsonReader::read_dynamic)
//! produces when the target shape is unknown: a minimal tagged union over the
//! six JSON value kinds, built by bounded recursive descent.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// A JSON object, with members in name order.
pub type Map = BTreeMap<String, Value>;
/// A JSON array.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Any JSON number, held as `f64`.
    Number(f64),
    /// A decoded string.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// A name-to-value map.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean payload, if this is a [`Boolean`](Value::Boolean).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a [`Number`](Value::Number).
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, if this is a [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The members, if this is an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

impl core::fmt::Display for Value {
    /// Writes the compact JSON text of the value.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::ser::to_string(self))
    }
}
