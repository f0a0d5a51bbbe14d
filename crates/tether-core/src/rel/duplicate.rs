use crate::{
    error::RelationError,
    model::{RelationModel, RelationSpec},
    rel::RelationSet,
    traits::{Record, RecordKind},
    value::AttributeMap,
};

// Copy a record through the relation's constructor.
//
// With `include_identity` false the copy is a brand-new, unsaved record
// carrying only non-identity attribute values.
pub(crate) fn copy_record(
    spec: &RelationSpec,
    source: &dyn Record,
    include_identity: bool,
) -> Box<dyn Record> {
    let mut copy = (spec.new_child)();
    let primary_key = copy.primary_key_name();

    for attr in source.attribute_names() {
        if !include_identity && *attr == primary_key {
            continue;
        }
        if let Some(value) = source.get_attribute(attr) {
            copy.set_attribute(attr, value);
        }
    }

    copy
}

impl RelationSet {
    /// Copies of a relation's desired collection, without persisting.
    ///
    /// Each copy is a fresh, unsaved instance carrying the source's
    /// attribute values but not its identity, so saving the copies can
    /// never collide with the source rows.
    pub fn clone_collection(
        &mut self,
        name: &str,
    ) -> Result<Vec<Box<dyn Record>>, RelationError> {
        let spec = self.resolve(name)?;
        let entry = self.entry_for(spec);

        Ok(entry
            .desired
            .iter()
            .map(|child| copy_record(spec, child.as_ref(), false))
            .collect())
    }

    /// Filter the desired collection in place by attribute equality.
    ///
    /// Keeps the records whose attributes match every given pair exactly,
    /// preserving relative order. The snapshot is untouched.
    pub fn filter_collection(
        &mut self,
        name: &str,
        predicate: &AttributeMap,
    ) -> Result<(), RelationError> {
        let entry = self.ensure_entry(name)?;

        entry.desired.retain(|child| {
            predicate
                .iter()
                .all(|(attr, expected)| child.get_attribute(attr).as_ref() == Some(expected))
        });

        Ok(())
    }
}

/// Full unsaved duplicate of a parent and its association graph.
///
/// The returned parent has no identity and copies of the source's
/// non-identity attributes; every declared relation is populated with
/// [`RelationSet::clone_collection`] output, assigned so foreign keys track
/// the (null) identity of the new parent until its first save.
pub fn deep_clone<P>(
    parent: &P,
    relations: &mut RelationSet,
) -> Result<(P, RelationSet), RelationError>
where
    P: RecordKind + RelationModel,
{
    let mut copy = P::default();
    for attr in parent.attribute_names() {
        if *attr == P::PRIMARY_KEY {
            continue;
        }
        if let Some(value) = parent.get_attribute(attr) {
            copy.set_attribute(attr, value);
        }
    }

    let mut cloned = RelationSet::with_options(P::RELATIONS, *relations.options());
    for spec in P::RELATIONS {
        let children = relations.clone_collection(spec.name)?;
        cloned.assign(&copy, spec.name, children)?;
    }

    Ok((copy, cloned))
}
