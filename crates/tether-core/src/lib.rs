//! Core runtime for Tether: the record contract, relation model, snapshot
//! differ, reconciler, bulk loader, cascade controller, and the ergonomics
//! exported via the `prelude`.
//!
//! Tether keeps the persisted state of one-to-many parent/child associations
//! in line with in-memory desired collections by snapshot diffing. It never
//! talks to storage itself; every mutation goes through the [`traits::Record`]
//! capability set supplied by the caller.

pub mod error;
pub mod model;
pub mod options;
pub mod rel;
pub mod traits;
pub mod types;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No internal helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        error::RelationError,
        model::{Link, RelationModel, RelationSpec},
        options::ReconcileOptions,
        rel::{BulkOutcome, CollectionDiff, Payload, RecordSet, RelationSet, deep_clone, diff},
        traits::{Record, RecordKind},
        types::Ulid,
        value::{AttributeMap, ErrorMap, Value},
    };
}
