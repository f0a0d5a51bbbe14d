use crate::value::{AttributeMap, ErrorMap, Value};

// -----------------------------------------------------------------------------
// Standard re-exports for `traits::X` ergonomics
// -----------------------------------------------------------------------------

pub use serde::{Deserialize, Serialize, de::DeserializeOwned};

///
/// Record
///
/// Object-safe capability set of the single-record persistence primitive.
///
/// ## Semantics
/// - A record owns its attribute mapping and its validation error state.
/// - `primary_key` is `Value::Null` until the record has a persisted
///   identity; the engine treats null identity as "new record".
/// - `validate`, `save`, and `delete` report outcome through their boolean
///   return and through `errors`; they never panic on domain failure.
///
/// The engine drives records exclusively through this trait. Storage,
/// transactions, and wire formats live behind the implementor.
///

pub trait Record {
    /// The record's current identity value; `Value::Null` when unsaved.
    fn primary_key(&self) -> Value;

    /// The declared name of the primary-key attribute.
    fn primary_key_name(&self) -> &'static str;

    /// All declared attribute names, primary key included.
    fn attribute_names(&self) -> &'static [&'static str];

    /// Read one attribute; `None` when the name is not declared.
    fn get_attribute(&self, name: &str) -> Option<Value>;

    /// Write one attribute; returns false when the name is not declared.
    fn set_attribute(&mut self, name: &str, value: Value) -> bool;

    /// Mass attribute assignment. Returns true when at least one attribute
    /// was applied.
    fn load(&mut self, attrs: &AttributeMap) -> bool {
        let mut any = false;
        for (name, value) in attrs {
            if self.set_attribute(name, value.clone()) {
                any = true;
            }
        }

        any
    }

    /// Validate the given attributes (all declared attributes when `None`),
    /// collecting issues into the record's error map.
    fn validate(&mut self, attrs: Option<&[&str]>, clear_errors: bool) -> bool;

    /// Persist the record, inserting or updating as the implementor sees fit.
    fn save(&mut self, run_validation: bool, attrs: Option<&[&str]>) -> bool;

    /// Remove the record from storage.
    fn delete(&mut self) -> bool;

    /// Validation errors collected by the last `validate`/`save` pass.
    fn errors(&self) -> &ErrorMap;

    fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// True once the record carries a persisted identity.
    fn is_saved(&self) -> bool {
        !self.primary_key().is_null()
    }
}

///
/// RecordKind
///
/// Type-level companion to [`Record`]: constructibility plus the identity
/// metadata the relation model needs at declaration time.
///
/// `RECORD_NAME` is the conventional input-scope key under which bulk
/// payload rows for this record type arrive.
///

pub trait RecordKind: Record + Default + 'static {
    const RECORD_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
}
