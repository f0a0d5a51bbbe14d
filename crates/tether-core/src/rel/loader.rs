use crate::{
    error::RelationError,
    model::RelationSpec,
    rel::{
        Payload, PayloadRow, RecordSet, RelationSet,
        reconcile::{parent_key, propagate_key},
    },
    traits::Record,
    value::Value,
};
use std::collections::BTreeMap;

///
/// BulkOutcome
///
/// Result of merging an input payload into a relation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BulkOutcome {
    /// The payload carried no rows for this relation's scope; the desired
    /// collection was left untouched.
    Skipped,

    /// Rows were merged and assigned; `loaded` counts the payload rows
    /// applied.
    Merged { loaded: usize },
}

impl RelationSet {
    /// Merge an untyped payload into a relation's desired collection.
    ///
    /// Payload rows are walked in order: a row whose identity matches an
    /// existing desired record reuses that instance and overwrites its
    /// attributes; an unmatched row becomes a freshly constructed, unsaved
    /// child. Existing records not referenced by any row are dropped from
    /// the desired collection and become removal candidates for the next
    /// `save`. Rows carrying a duplicate identity re-load onto the already
    /// merged instance — last write wins.
    ///
    /// The merge ends with an assignment: snapshot capture and foreign-key
    /// propagation behave exactly as in [`RelationSet::assign`].
    pub fn merge_from_payload(
        &mut self,
        parent: &dyn Record,
        name: &str,
        payload: &Payload,
    ) -> Result<BulkOutcome, RelationError> {
        let spec = self.reconciled(name)?;

        let Some(rows) = payload.rows_for(spec.scope) else {
            self.debug_log(format!(
                "merge {name}: no rows under scope '{}'",
                spec.scope
            ));
            return Ok(BulkOutcome::Skipped);
        };

        let key = parent_key(parent, spec.link.local_key);
        let entry = self.entry_for(spec);
        let existing = std::mem::take(&mut entry.desired);
        let (merged, leftovers) = merge_rows(spec, existing.into_inner(), rows);

        // Same shape as `assign`: the unreferenced remainder of the previous
        // collection is the snapshot side of the next diff; matched
        // instances moved into the merged collection and cannot be removal
        // candidates.
        let mut desired = RecordSet::new(merged);
        propagate_key(&mut desired, spec.link.foreign_key, &key);
        entry.snapshot = RecordSet::new(leftovers);
        entry.desired = desired;
        entry.assigned = true;

        let loaded = rows.len();
        self.debug_log(format!("merge {name}: loaded={loaded}"));

        Ok(BulkOutcome::Merged { loaded })
    }

    /// Back-fill identity values positionally onto the desired collection.
    ///
    /// The narrow variant for flows that reconcile primary keys only: the
    /// n-th identity lands on the n-th desired record. Surplus identities
    /// are ignored, surplus records keep their identity.
    pub fn merge_identity_only(
        &mut self,
        name: &str,
        identities: &[Value],
    ) -> Result<(), RelationError> {
        let spec = self.reconciled(name)?;
        let entry = self.entry_for(spec);

        for (child, identity) in entry.desired.iter_mut().zip(identities) {
            let primary_key = child.primary_key_name();
            child.set_attribute(primary_key, identity.clone());
        }

        Ok(())
    }
}

// Merge payload rows with the previous desired collection.
//
// Returns the merged collection in payload order plus the unmatched
// remainder of the previous collection.
fn merge_rows(
    spec: &RelationSpec,
    existing: Vec<Box<dyn Record>>,
    rows: &[PayloadRow],
) -> (Vec<Box<dyn Record>>, Vec<Box<dyn Record>>) {
    let primary_key = (spec.new_child)().primary_key_name();

    // Pool the previous collection, indexed by identity (last wins).
    let mut pool: Vec<Option<Box<dyn Record>>> = existing.into_iter().map(Some).collect();
    let mut pool_index: BTreeMap<Value, usize> = BTreeMap::new();
    for (slot, record) in pool.iter().enumerate() {
        if let Some(record) = record {
            let identity = record.primary_key();
            if !identity.is_null() {
                pool_index.insert(identity, slot);
            }
        }
    }

    let mut merged: Vec<Box<dyn Record>> = Vec::with_capacity(rows.len());
    let mut merged_index: BTreeMap<Value, usize> = BTreeMap::new();

    for row in rows {
        let identity = row.get(primary_key).cloned().unwrap_or(Value::Null);

        if !identity.is_null() {
            // Duplicate identity within the payload: overwrite the instance
            // merged earlier, last write wins.
            if let Some(&pos) = merged_index.get(&identity) {
                merged[pos].load(row);
                continue;
            }

            if let Some(slot) = pool_index.get(&identity).copied() {
                if let Some(mut instance) = pool[slot].take() {
                    instance.load(row);
                    merged_index.insert(identity, merged.len());
                    merged.push(instance);
                    continue;
                }
            }
        }

        let mut instance = (spec.new_child)();
        instance.load(row);
        if !identity.is_null() {
            merged_index.insert(identity, merged.len());
        }
        merged.push(instance);
    }

    let leftovers = pool.into_iter().flatten().collect();

    (merged, leftovers)
}
