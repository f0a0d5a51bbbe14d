//! In-memory reference implementation of the record primitive.
//!
//! Rows live in thread-local tables keyed by record name, with
//! auto-incremented unsigned keys. The backend is deliberately small: it
//! exists so the reconciliation engine can be exercised end-to-end without
//! any storage infrastructure, and so tests observe real persisted state.

use crate::core::{
    model::{RelationModel, RelationSpec},
    traits::{Record, RecordKind},
    value::{AttributeMap, ErrorMap, Value},
};
use std::{cell::RefCell, collections::BTreeMap, marker::PhantomData};

// Tables are thread-local: the engine is single-threaded and request-scoped,
// and the cargo test harness gives each test its own thread.
thread_local! {
    static TABLES: RefCell<BTreeMap<&'static str, Table>> = const { RefCell::new(BTreeMap::new()) };
}

#[derive(Default)]
struct Table {
    rows: BTreeMap<Value, AttributeMap>,
    next_key: u64,
}

fn with_table<R>(name: &'static str, f: impl FnOnce(&mut Table) -> R) -> R {
    TABLES.with(|tables| f(tables.borrow_mut().entry(name).or_default()))
}

/// Drop every table on this thread.
pub fn reset() {
    TABLES.with(|tables| tables.borrow_mut().clear());
}

/// Number of persisted rows for a schema.
#[must_use]
pub fn row_count<S: MemSchema>() -> usize {
    with_table(S::NAME, |table| table.rows.len())
}

/// The persisted attribute row behind a key, if any.
#[must_use]
pub fn fetch<S: MemSchema>(key: &Value) -> Option<AttributeMap> {
    with_table(S::NAME, |table| table.rows.get(key).cloned())
}

/// All persisted rows for a schema, in key order.
#[must_use]
pub fn rows<S: MemSchema>() -> Vec<AttributeMap> {
    with_table(S::NAME, |table| table.rows.values().cloned().collect())
}

///
/// MemSchema
///
/// Declared shape of an in-memory record type: table name, attribute list,
/// and which attributes must be present for validation to pass.
///

pub trait MemSchema: 'static {
    const NAME: &'static str;
    const PRIMARY_KEY: &'static str = "id";
    const ATTRIBUTES: &'static [&'static str];
    const REQUIRED: &'static [&'static str] = &[];
}

///
/// MemRelations
///
/// Relation declarations for a schema; lifts into [`RelationModel`] on the
/// record type so parent schemas declare their one-to-many associations in
/// one place.
///

pub trait MemRelations: MemSchema {
    const RELATIONS: &'static [RelationSpec];
}

impl<S: MemRelations> RelationModel for MemRecord<S> {
    const RELATIONS: &'static [RelationSpec] = S::RELATIONS;
}

///
/// MemRecord
///
/// One record over a [`MemSchema`]-declared table. Carries its attribute
/// values and validation errors; storage state lives in the thread-local
/// tables.
///

#[derive(Debug)]
pub struct MemRecord<S: MemSchema> {
    values: AttributeMap,
    errors: ErrorMap,
    _marker: PhantomData<fn() -> S>,
}

impl<S: MemSchema> MemRecord<S> {
    /// Construct an unsaved record from attribute values.
    ///
    /// Unknown attribute names are ignored, as in mass assignment.
    #[must_use]
    pub fn with(attrs: AttributeMap) -> Self {
        let mut record = Self::default();
        record.load(&attrs);

        record
    }

    #[must_use]
    pub fn boxed(self) -> Box<dyn Record> {
        Box::new(self)
    }

    fn is_blank(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl<S: MemSchema> Default for MemRecord<S> {
    fn default() -> Self {
        Self {
            values: AttributeMap::new(),
            errors: ErrorMap::new(),
            _marker: PhantomData,
        }
    }
}

impl<S: MemSchema> Record for MemRecord<S> {
    fn primary_key(&self) -> Value {
        self.values
            .get(S::PRIMARY_KEY)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn primary_key_name(&self) -> &'static str {
        S::PRIMARY_KEY
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        S::ATTRIBUTES
    }

    fn get_attribute(&self, name: &str) -> Option<Value> {
        if !S::ATTRIBUTES.contains(&name) {
            return None;
        }

        Some(self.values.get(name).cloned().unwrap_or(Value::Null))
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> bool {
        if !S::ATTRIBUTES.contains(&name) {
            return false;
        }

        self.values.insert(name.to_string(), value);
        true
    }

    fn validate(&mut self, attrs: Option<&[&str]>, clear_errors: bool) -> bool {
        if clear_errors {
            self.errors.clear();
        }

        let targets: &[&str] = attrs.unwrap_or(S::ATTRIBUTES);
        for required in S::REQUIRED {
            if !targets.contains(required) {
                continue;
            }
            let value = self.values.get(*required).cloned().unwrap_or(Value::Null);
            if Self::is_blank(&value) {
                self.errors
                    .entry((*required).to_string())
                    .or_default()
                    .push(format!("{required} cannot be blank"));
            }
        }

        self.errors.is_empty()
    }

    fn save(&mut self, run_validation: bool, attrs: Option<&[&str]>) -> bool {
        if run_validation && !self.validate(attrs, true) {
            return false;
        }

        if self.primary_key().is_null() {
            let key = with_table(S::NAME, |table| {
                table.next_key += 1;
                table.next_key
            });
            self.values
                .insert(S::PRIMARY_KEY.to_string(), Value::Uint(key));
        }

        with_table(S::NAME, |table| {
            table.rows.insert(self.primary_key(), self.values.clone());
        });

        true
    }

    fn delete(&mut self) -> bool {
        let key = self.primary_key();
        if key.is_null() {
            return false;
        }

        with_table(S::NAME, |table| table.rows.remove(&key)).is_some()
    }

    fn errors(&self) -> &ErrorMap {
        &self.errors
    }
}

impl<S: MemSchema> RecordKind for MemRecord<S> {
    const RECORD_NAME: &'static str = S::NAME;
    const PRIMARY_KEY: &'static str = S::PRIMARY_KEY;
}

///
/// TESTS
///
