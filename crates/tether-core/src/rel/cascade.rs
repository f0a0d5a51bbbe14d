use crate::{
    model::RelationSpec,
    rel::RelationSet,
    traits::Record,
    value::ErrorMap,
};
use std::collections::BTreeMap;

impl RelationSet {
    /// Validate every reconciled relation that has been assigned.
    ///
    /// Collects all failures across all relations; never stops early.
    pub fn validate_all(&mut self) -> bool {
        let mut ok = true;
        for spec in self.reconciled_assigned() {
            if !self.validate_spec(spec, None) {
                ok = false;
            }
        }

        ok
    }

    /// Save every reconciled relation that has been assigned.
    ///
    /// Gated: when validation-before-save is enabled (the default) and
    /// `validate_all` reports failure, nothing is saved and the call
    /// reports failure. With the gate open, saving is best-effort across
    /// relations exactly as per-relation `save`.
    pub fn save_all(&mut self, parent: &dyn Record) -> bool {
        if self.options().validate_before_save && !self.validate_all() {
            self.debug_log("save_all: gated by validation failure, nothing saved");
            return false;
        }

        let mut ok = true;
        for spec in self.reconciled_assigned() {
            if !self.save_spec(parent, spec) {
                ok = false;
            }
        }

        ok
    }

    /// Delete the desired collections of every reconciled, assigned
    /// relation.
    pub fn delete_all(&mut self) -> bool {
        let mut ok = true;
        for spec in self.reconciled_assigned() {
            if !self.delete_spec(spec) {
                ok = false;
            }
        }

        ok
    }

    /// Per-relation error maps of every child that currently has
    /// validation errors, for every assigned relation.
    #[must_use]
    pub fn errors_all(&self) -> BTreeMap<&'static str, Vec<ErrorMap>> {
        let mut out = BTreeMap::new();
        for spec in self.assigned() {
            let Some(entry) = self.entries.get(spec.name) else {
                continue;
            };

            let errors: Vec<ErrorMap> = entry
                .desired
                .iter()
                .filter(|child| child.has_errors())
                .map(|child| child.errors().clone())
                .collect();
            if !errors.is_empty() {
                out.insert(spec.name, errors);
            }
        }

        out
    }

    /// Pre-delete hook for the parent record: delete every relation
    /// declared for reconciliation, materializing entries as needed.
    ///
    /// The aggregate is advisory. A false return reports relation-delete
    /// failures to the caller but does not veto the parent row's own
    /// removal attempt; that policy decision stays with the caller.
    pub fn before_parent_delete(&mut self) -> bool {
        let specs: &'static [RelationSpec] = self.specs;
        let kept: Vec<&'static RelationSpec> =
            specs.iter().filter(|spec| spec.keep_updated).collect();

        let mut ok = true;
        for spec in kept {
            if !self.delete_spec(spec) {
                ok = false;
            }
        }

        self.debug_log(format!("before_parent_delete: ok={ok}"));

        ok
    }
}
