use crate::{
    error::RelationError,
    model::RelationSpec,
    rel::{RecordSet, RelationSet, diff::diff, duplicate::copy_record},
    traits::Record,
    value::Value,
};

// Push one key value into the foreign-key attribute of every record.
pub(crate) fn propagate_key(records: &mut RecordSet, foreign_key: &str, key: &Value) {
    for record in records.iter_mut() {
        record.set_attribute(foreign_key, key.clone());
    }
}

// Read the parent-side key value named by the link descriptor.
// A parent without a persisted identity yields the null placeholder; it is
// re-propagated at save time once the parent row exists.
pub(crate) fn parent_key(parent: &dyn Record, local_key: &str) -> Value {
    parent.get_attribute(local_key).unwrap_or(Value::Null)
}

impl RelationSet {
    /// Replace a relation's desired collection.
    ///
    /// The collection current the instant before this call becomes the
    /// snapshot (the diff baseline for the next `save`), and the parent's
    /// key is propagated into every incoming child's foreign-key attribute.
    pub fn assign(
        &mut self,
        parent: &dyn Record,
        name: &str,
        children: Vec<Box<dyn Record>>,
    ) -> Result<(), RelationError> {
        let spec = self.resolve(name)?;
        let key = parent_key(parent, spec.link.local_key);

        let mut incoming = RecordSet::new(children);
        propagate_key(&mut incoming, spec.link.foreign_key, &key);

        let entry = self.entry_for(spec);
        entry.snapshot = std::mem::take(&mut entry.desired);
        entry.desired = incoming;
        entry.assigned = true;

        let (desired, snapshot) = (entry.desired.len(), entry.snapshot.len());
        self.debug_log(format!(
            "assign {name}: desired={desired} snapshot={snapshot} key={key}"
        ));

        Ok(())
    }

    /// Validate every record in the desired collection.
    ///
    /// All declared attributes are validated except the system-managed
    /// foreign key, unless an explicit attribute subset is given. Collects
    /// all failures; never stops at the first.
    pub fn validate(
        &mut self,
        name: &str,
        attrs: Option<&[&str]>,
    ) -> Result<bool, RelationError> {
        let spec = self.reconciled(name)?;

        Ok(self.validate_spec(spec, attrs))
    }

    pub(crate) fn validate_spec(
        &mut self,
        spec: &'static RelationSpec,
        attrs: Option<&[&str]>,
    ) -> bool {
        let foreign_key = spec.link.foreign_key;
        let entry = self.entry_for(spec);

        let mut ok = true;
        for child in entry.desired.iter_mut() {
            let names: Vec<&str> = match attrs {
                Some(subset) => subset.to_vec(),
                None => child
                    .attribute_names()
                    .iter()
                    .copied()
                    .filter(|attr| *attr != foreign_key)
                    .collect(),
            };

            if !child.validate(Some(&names), true) {
                ok = false;
            }
        }

        ok
    }

    /// Reconcile a relation's persisted state with its desired collection.
    ///
    /// Diffs the snapshot against the desired collection, re-propagates the
    /// parent key, saves every desired member, and deletes every removal
    /// candidate. Best-effort and non-transactional: one failing record
    /// never aborts the remainder, and nothing is rolled back. Returns true
    /// iff every individual save and delete succeeded.
    pub fn save(&mut self, parent: &dyn Record, name: &str) -> Result<bool, RelationError> {
        let spec = self.reconciled(name)?;

        Ok(self.save_spec(parent, spec))
    }

    pub(crate) fn save_spec(
        &mut self,
        parent: &dyn Record,
        spec: &'static RelationSpec,
    ) -> bool {
        let key = parent_key(parent, spec.link.local_key);
        let foreign_key = spec.link.foreign_key;
        let entry = self.entry_for(spec);
        let d = diff(&entry.snapshot, &entry.desired);

        let mut ok = true;
        for pos in d.upsert {
            let child = &mut entry.desired[pos];
            // Parent key may have changed since assignment (first insert).
            child.set_attribute(foreign_key, key.clone());
            if !child.save(false, None) {
                ok = false;
            }
        }

        let (saved, removed) = (entry.desired.len(), d.remove.len());
        for pos in d.remove {
            if !entry.snapshot[pos].delete() {
                ok = false;
            }
        }

        self.debug_log(format!(
            "save {}: saved={saved} removed={removed} ok={ok}",
            spec.name
        ));

        ok
    }

    /// Delete every record currently in the desired collection.
    pub fn delete(&mut self, name: &str) -> Result<bool, RelationError> {
        let spec = self.reconciled(name)?;

        Ok(self.delete_spec(spec))
    }

    pub(crate) fn delete_spec(&mut self, spec: &'static RelationSpec) -> bool {
        let entry = self.entry_for(spec);

        let mut ok = true;
        for child in entry.desired.iter_mut() {
            if !child.delete() {
                ok = false;
            }
        }

        let count = entry.desired.len();
        self.debug_log(format!("delete {}: records={count} ok={ok}", spec.name));

        ok
    }

    /// Rebase the snapshot onto the current desired collection.
    ///
    /// `save` never refreshes the snapshot itself; callers that run repeated
    /// save passes without reassignment resync explicitly in between.
    pub fn resync(&mut self, name: &str) -> Result<(), RelationError> {
        let spec = self.resolve(name)?;
        let entry = self.entry_for(spec);

        let copies = entry
            .desired
            .iter()
            .map(|child| copy_record(spec, child.as_ref(), true))
            .collect();
        entry.snapshot = RecordSet::new(copies);
        entry.assigned = true;

        Ok(())
    }
}
