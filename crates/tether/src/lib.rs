//! ## Crate layout
//! - `core`: the engine — record contract, relation model, differ,
//!   reconciler, bulk loader, cascade controller, and duplication helpers.
//! - `mem`: an in-memory reference implementation of the record primitive,
//!   used by the integration tests and by consumers that want a
//!   zero-infrastructure record type.
//!
//! The `prelude` module mirrors the surface used by request-handling code.

pub use tether_core as core;

pub mod mem;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        attr_map,
        error::RelationError,
        model::{Link, RelationModel, RelationSpec},
        options::ReconcileOptions,
        rel::{BulkOutcome, CollectionDiff, Payload, RecordSet, RelationSet, deep_clone, diff},
        traits::{Record, RecordKind},
        types::Ulid,
        value::{AttributeMap, ErrorMap, Value},
    };
    pub use crate::mem::{MemRecord, MemRelations, MemSchema};
}
