use thiserror::Error as ThisError;

///
/// RelationError
///
/// Structural misuse of the relation surface. These are programmer/caller
/// errors and surface immediately; per-record validation and persistence
/// failures never appear here — they are reported through boolean
/// aggregates and each record's own error map.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RelationError {
    /// The relation name is absent from the parent's declared relation table.
    #[error("relation: unknown relation '{name}'")]
    UnknownRelation { name: String },

    /// The relation exists but is not declared for reconciliation.
    #[error("relation: '{name}' is not declared for reconciliation")]
    InvalidRelationRequest { name: String },

    /// A prepared input payload held nothing usable.
    #[error("payload: prepared input contains no usable rows")]
    EmptyPayload,
}

impl RelationError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownRelation {
            name: name.to_string(),
        }
    }

    pub(crate) fn not_reconciled(name: &str) -> Self {
        Self::InvalidRelationRequest {
            name: name.to_string(),
        }
    }
}
