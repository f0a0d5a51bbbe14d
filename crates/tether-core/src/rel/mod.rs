mod cascade;
mod diff;
mod duplicate;
mod loader;
mod payload;
mod reconcile;


pub use diff::{CollectionDiff, diff};
pub use duplicate::deep_clone;
pub use loader::BulkOutcome;
pub use payload::{Payload, PayloadRow};

use crate::{
    error::RelationError,
    model::{RelationModel, RelationSpec},
    options::ReconcileOptions,
    traits::Record,
    value::Value,
};
use derive_more::{Deref, DerefMut, IntoIterator};
use std::{collections::BTreeMap, fmt};

///
/// RecordSet
///
/// Owned, ordered collection of child records bound to one relation slot.
/// Children are exclusively referenced by the slot that holds them; moving
/// a child between relations is not supported.
///

#[derive(Default, Deref, DerefMut, IntoIterator)]
pub struct RecordSet(#[into_iterator(owned, ref, ref_mut)] Vec<Box<dyn Record>>);

impl RecordSet {
    #[must_use]
    pub fn new(records: Vec<Box<dyn Record>>) -> Self {
        Self(records)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Box<dyn Record>> {
        self.0
    }

    /// Identity → position index over this collection.
    ///
    /// Records without a persisted identity are unindexed; on duplicate
    /// identities the last occurrence wins.
    #[must_use]
    pub fn identity_index(&self) -> BTreeMap<Value, usize> {
        let mut index = BTreeMap::new();
        for (pos, record) in self.0.iter().enumerate() {
            let identity = record.primary_key();
            if !identity.is_null() {
                index.insert(identity, pos);
            }
        }

        index
    }
}

impl fmt::Debug for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|record| record.primary_key()))
            .finish()
    }
}

///
/// RelationEntry
///
/// Per-instance runtime state of one declared relation: the live desired
/// collection plus the snapshot taken the instant before the most recent
/// assignment. The snapshot is the diff baseline for save-time
/// reconciliation and is never refreshed implicitly.
///

#[derive(Default)]
pub(crate) struct RelationEntry {
    pub(crate) desired: RecordSet,
    pub(crate) snapshot: RecordSet,
    pub(crate) assigned: bool,
}

///
/// RelationSet
///
/// Per-parent-instance relation registry and snapshot store.
///
/// Entries materialize lazily, at most once per relation name, from the
/// parent type's static relation table. The set owns every desired
/// collection and snapshot for the lifetime of the parent flow; it is
/// request-scoped and single-threaded by design.
///

pub struct RelationSet {
    specs: &'static [RelationSpec],
    entries: BTreeMap<&'static str, RelationEntry>,
    options: ReconcileOptions,
}

impl RelationSet {
    #[must_use]
    pub fn new(specs: &'static [RelationSpec]) -> Self {
        Self::with_options(specs, ReconcileOptions::default())
    }

    #[must_use]
    pub fn with_options(specs: &'static [RelationSpec], options: ReconcileOptions) -> Self {
        Self {
            specs,
            entries: BTreeMap::new(),
            options,
        }
    }

    /// Construct over a parent type's declared relation table.
    #[must_use]
    pub fn for_model<P: RelationModel>() -> Self {
        Self::new(P::RELATIONS)
    }

    #[must_use]
    pub const fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Resolve a declared relation by name.
    pub fn resolve(&self, name: &str) -> Result<&'static RelationSpec, RelationError> {
        let specs: &'static [RelationSpec] = self.specs;

        specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| RelationError::unknown(name))
    }

    // Resolve a relation that participates in reconciliation.
    pub(crate) fn reconciled(&self, name: &str) -> Result<&'static RelationSpec, RelationError> {
        let spec = self.resolve(name)?;
        if !spec.keep_updated {
            return Err(RelationError::not_reconciled(name));
        }

        Ok(spec)
    }

    // Materialize the runtime entry for a declared relation.
    // Registration is keyed by name; repeat calls are no-op overwrites.
    pub(crate) fn ensure_entry(
        &mut self,
        name: &str,
    ) -> Result<&mut RelationEntry, RelationError> {
        let spec = self.resolve(name)?;

        Ok(self.entry_for(spec))
    }

    pub(crate) fn entry_for(&mut self, spec: &'static RelationSpec) -> &mut RelationEntry {
        self.entries.entry(spec.name).or_default()
    }

    /// The live desired collection for a relation.
    pub fn collection(&mut self, name: &str) -> Result<&RecordSet, RelationError> {
        Ok(&self.ensure_entry(name)?.desired)
    }

    /// Mutable access to the desired collection, for caller-side edits
    /// between load and save.
    pub fn collection_mut(&mut self, name: &str) -> Result<&mut RecordSet, RelationError> {
        Ok(&mut self.ensure_entry(name)?.desired)
    }

    /// The snapshot taken before the most recent assignment, if any.
    pub fn snapshot(&self, name: &str) -> Result<Option<&RecordSet>, RelationError> {
        self.resolve(name)?;

        Ok(self
            .entries
            .get(name)
            .filter(|entry| entry.assigned)
            .map(|entry| &entry.snapshot))
    }

    /// True once the relation has been assigned at least once.
    #[must_use]
    pub fn is_assigned(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|entry| entry.assigned)
    }

    // Reconciled relations with a snapshot entry, in declaration order.
    pub(crate) fn reconciled_assigned(&self) -> Vec<&'static RelationSpec> {
        let specs: &'static [RelationSpec] = self.specs;

        specs
            .iter()
            .filter(|spec| spec.keep_updated && self.is_assigned(spec.name))
            .collect()
    }

    // Relations with a snapshot entry, in declaration order.
    pub(crate) fn assigned(&self) -> Vec<&'static RelationSpec> {
        let specs: &'static [RelationSpec] = self.specs;

        specs
            .iter()
            .filter(|spec| self.is_assigned(spec.name))
            .collect()
    }

    pub(crate) fn debug_log(&self, s: impl Into<String>) {
        if self.options.debug {
            println!("[debug] {}", s.into());
        }
    }
}

impl fmt::Debug for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationSet")
            .field("relations", &self.specs.len())
            .field("materialized", &self.entries.len())
            .field("options", &self.options)
            .finish()
    }
}
