use crate::rel::RecordSet;

///
/// CollectionDiff
///
/// Outcome of diffing a relation's snapshot ("old") against its desired
/// collection ("new"). Positions index into the source collections so the
/// differ never takes ownership of records.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CollectionDiff {
    /// Every position of `new`, in original order.
    pub upsert: Vec<usize>,

    /// Positions of `old` members whose identity is absent from `new`,
    /// in `old`'s original order.
    pub remove: Vec<usize>,
}

/// Partition old/new collections into upsert and removal sets by identity.
///
/// Records without a persisted identity cannot be matched for removal and
/// are implicitly upserts. Duplicate identities are not deduplicated: the
/// last occurrence wins for lookup purposes, every occurrence stays in
/// iteration order.
#[must_use]
pub fn diff(old: &RecordSet, new: &RecordSet) -> CollectionDiff {
    let new_index = new.identity_index();

    let upsert = (0..new.len()).collect();
    let remove = old
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            let identity = record.primary_key();
            !identity.is_null() && !new_index.contains_key(&identity)
        })
        .map(|(pos, _)| pos)
        .collect();

    CollectionDiff { upsert, remove }
}

///
/// TESTS
///
