use crate::{
    model::{Link, RelationModel, RelationSpec},
    test_support::{log_op, next_key},
    traits::{Record, RecordKind},
    value::{AttributeMap, ErrorMap, Value},
};

///
/// TestChild
///
/// Scripted child fixture. Persistence behavior is driven by attribute
/// values so payload-constructed instances misbehave the same way as
/// hand-built ones:
/// - `name` of "poison-save" fails `save`, "poison-delete" fails `delete`
/// - `validate` requires a non-blank `name` and a non-null `parent_id`,
///   and rejects `status` "broken"
///
/// Every save/delete attempt is recorded in the thread-local op log.
///

#[derive(Debug, Default)]
pub(crate) struct TestChild {
    values: AttributeMap,
    errors: ErrorMap,
}

const CHILD_ATTRS: &[&str] = &["id", "parent_id", "name", "status"];

impl TestChild {
    pub(crate) fn with_id(id: Option<u64>, name: &str) -> Self {
        let mut values = AttributeMap::new();
        if let Some(id) = id {
            values.insert("id".to_string(), Value::Uint(id));
        }
        values.insert("name".to_string(), Value::Text(name.to_string()));

        Self {
            values,
            errors: ErrorMap::new(),
        }
    }

    pub(crate) fn boxed(self) -> Box<dyn Record> {
        Box::new(self)
    }

    fn name(&self) -> &str {
        self.values
            .get("name")
            .and_then(Value::as_text)
            .unwrap_or_default()
    }
}

impl Record for TestChild {
    fn primary_key(&self) -> Value {
        self.values.get("id").cloned().unwrap_or(Value::Null)
    }

    fn primary_key_name(&self) -> &'static str {
        "id"
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        CHILD_ATTRS
    }

    fn get_attribute(&self, name: &str) -> Option<Value> {
        if !CHILD_ATTRS.contains(&name) {
            return None;
        }

        Some(self.values.get(name).cloned().unwrap_or(Value::Null))
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> bool {
        if !CHILD_ATTRS.contains(&name) {
            return false;
        }

        self.values.insert(name.to_string(), value);
        true
    }

    fn validate(&mut self, attrs: Option<&[&str]>, clear_errors: bool) -> bool {
        if clear_errors {
            self.errors.clear();
        }

        let all = CHILD_ATTRS;
        let targets: &[&str] = attrs.unwrap_or(all);

        if targets.contains(&"parent_id")
            && self.values.get("parent_id").is_none_or(Value::is_null)
        {
            self.errors
                .entry("parent_id".to_string())
                .or_default()
                .push("parent id is required".to_string());
        }
        if targets.contains(&"name") && self.name().is_empty() {
            self.errors
                .entry("name".to_string())
                .or_default()
                .push("name cannot be blank".to_string());
        }
        if targets.contains(&"status")
            && self.values.get("status").and_then(Value::as_text) == Some("broken")
        {
            self.errors
                .entry("status".to_string())
                .or_default()
                .push("status is not acceptable".to_string());
        }

        self.errors.is_empty()
    }

    fn save(&mut self, run_validation: bool, attrs: Option<&[&str]>) -> bool {
        log_op(format!("save:{}", self.name()));

        if run_validation && !self.validate(attrs, true) {
            return false;
        }
        if self.name() == "poison-save" {
            return false;
        }
        if self.primary_key().is_null() {
            self.values.insert("id".to_string(), Value::Uint(next_key()));
        }

        true
    }

    fn delete(&mut self) -> bool {
        log_op(format!("delete:{}", self.primary_key()));

        self.name() != "poison-delete"
    }

    fn errors(&self) -> &ErrorMap {
        &self.errors
    }
}

impl RecordKind for TestChild {
    const RECORD_NAME: &'static str = "item";
    const PRIMARY_KEY: &'static str = "id";
}

///
/// TestParent
///
/// Parent fixture declaring three relations over `TestChild`: a default
/// reconciled one, one with an overridden input scope, and one managed
/// manually.
///

#[derive(Debug, Default)]
pub(crate) struct TestParent {
    values: AttributeMap,
    errors: ErrorMap,
}

const PARENT_ATTRS: &[&str] = &["id", "title"];

impl TestParent {
    pub(crate) fn saved(id: u64, title: &str) -> Self {
        let mut values = AttributeMap::new();
        values.insert("id".to_string(), Value::Uint(id));
        values.insert("title".to_string(), Value::Text(title.to_string()));

        Self {
            values,
            errors: ErrorMap::new(),
        }
    }
}

impl Record for TestParent {
    fn primary_key(&self) -> Value {
        self.values.get("id").cloned().unwrap_or(Value::Null)
    }

    fn primary_key_name(&self) -> &'static str {
        "id"
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        PARENT_ATTRS
    }

    fn get_attribute(&self, name: &str) -> Option<Value> {
        if !PARENT_ATTRS.contains(&name) {
            return None;
        }

        Some(self.values.get(name).cloned().unwrap_or(Value::Null))
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> bool {
        if !PARENT_ATTRS.contains(&name) {
            return false;
        }

        self.values.insert(name.to_string(), value);
        true
    }

    fn validate(&mut self, _attrs: Option<&[&str]>, clear_errors: bool) -> bool {
        if clear_errors {
            self.errors.clear();
        }

        true
    }

    fn save(&mut self, _run_validation: bool, _attrs: Option<&[&str]>) -> bool {
        log_op("save-parent".to_string());

        if self.primary_key().is_null() {
            self.values.insert("id".to_string(), Value::Uint(next_key()));
        }

        true
    }

    fn delete(&mut self) -> bool {
        log_op("delete-parent".to_string());

        true
    }

    fn errors(&self) -> &ErrorMap {
        &self.errors
    }
}

impl RecordKind for TestParent {
    const RECORD_NAME: &'static str = "parent";
    const PRIMARY_KEY: &'static str = "id";
}

impl RelationModel for TestParent {
    const RELATIONS: &'static [RelationSpec] = &[
        RelationSpec::of::<TestChild>("items", Link::new("parent_id", "id")),
        RelationSpec::of::<TestChild>("archive", Link::new("parent_id", "id"))
            .with_scope("archived"),
        RelationSpec::of::<TestChild>("drafts", Link::new("parent_id", "id")).manual(),
    ];
}
