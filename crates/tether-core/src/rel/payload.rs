use crate::{error::RelationError, value::{AttributeMap, Value}};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One untyped input row: attribute name → value.
pub type PayloadRow = AttributeMap;

///
/// Payload
///
/// Ordered, untyped input rows handed to the bulk loader, either bare or
/// nested one level under record scope keys. The parsing layer that
/// produces these is an external collaborator; `from_json` covers the
/// common bridge from request bodies.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Rows addressed to whichever relation the caller names.
    Rows(Vec<PayloadRow>),

    /// Rows grouped under scope keys; a relation only sees the rows filed
    /// under its own scope.
    Scoped(BTreeMap<String, Vec<PayloadRow>>),
}

impl Payload {
    /// The rows addressed to `scope`.
    ///
    /// Bare rows match any scope; scoped payloads match only when the scope
    /// key is present. `None` means "no effective input for this relation"
    /// and is not an error.
    #[must_use]
    pub fn rows_for(&self, scope: &str) -> Option<&[PayloadRow]> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Scoped(map) => map.get(scope).map(Vec::as_slice),
        }
    }

    /// Bridge an untyped JSON document into a payload.
    ///
    /// Accepted shapes: an array of objects, or an object whose values are
    /// arrays of objects (scoped). Anything else carries no usable rows and
    /// fails with [`RelationError::EmptyPayload`]. Non-scalar attribute
    /// values inside a row are dropped; identity and scalar attributes
    /// survive.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, RelationError> {
        match json {
            serde_json::Value::Array(items) => {
                let rows = rows_from_json(items).ok_or(RelationError::EmptyPayload)?;

                Ok(Self::Rows(rows))
            }
            serde_json::Value::Object(map) => {
                let mut scoped = BTreeMap::new();
                for (scope, value) in map {
                    let serde_json::Value::Array(items) = value else {
                        continue;
                    };
                    if let Some(rows) = rows_from_json(items) {
                        scoped.insert(scope.clone(), rows);
                    }
                }

                if scoped.is_empty() {
                    return Err(RelationError::EmptyPayload);
                }

                Ok(Self::Scoped(scoped))
            }
            _ => Err(RelationError::EmptyPayload),
        }
    }
}

// Convert an array of JSON objects into rows; any non-object element makes
// the whole array unusable.
fn rows_from_json(items: &[serde_json::Value]) -> Option<Vec<PayloadRow>> {
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let serde_json::Value::Object(fields) = item else {
            return None;
        };

        let mut row = PayloadRow::new();
        for (name, value) in fields {
            if let Some(value) = Value::from_json(value) {
                row.insert(name.clone(), value);
            }
        }
        rows.push(row);
    }

    Some(rows)
}

///
/// TESTS
///
