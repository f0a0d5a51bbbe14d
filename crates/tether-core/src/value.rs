use crate::types::Ulid;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Attribute name → value mapping exchanged with the record primitive.
pub type AttributeMap = BTreeMap<String, Value>;

/// Attribute name → validation messages, as reported by a record.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

///
/// Value
///
/// Dynamic attribute value exchanged with the record primitive.
///
/// Variant declaration order is the canonical rank: the derived `Ord`
/// compares rank first, then within-variant contents. Mixed-variant
/// comparisons must remain deterministic because identity indexes are
/// keyed by `Value`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    /// Placeholder for "no value", including not-yet-assigned identities.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the contained unsigned integer, if that is what this is.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained text, if that is what this is.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a scalar JSON value into a `Value`.
    ///
    /// Non-negative numbers become `Uint` so payload identities compare
    /// equal to engine-allocated keys; negative numbers become `Int`.
    /// Non-scalar shapes (arrays, objects) and non-integral numbers are not
    /// representable in the attribute model and map to `None`.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(Self::Uint)
                .or_else(|| n.as_i64().map(Self::Int)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Ulid> for Value {
    fn from(v: Ulid) -> Self {
        Self::Ulid(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

// attr_map
//
// Test-friendly constructor for `AttributeMap` literals.
#[macro_export]
macro_rules! attr_map {
    ( $( $name:expr => $value:expr ),* $(,)? ) => {{
        let mut map = $crate::value::AttributeMap::new();
        $(
            map.insert(($name).to_string(), $crate::value::Value::from($value));
        )*
        map
    }};
}

///
/// TESTS
///
