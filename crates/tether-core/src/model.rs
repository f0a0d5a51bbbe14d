use crate::traits::{Record, RecordKind};
use std::fmt;

///
/// Link
///
/// Declarative mapping from a child's foreign-key attribute to the parent's
/// local key attribute. Pure data; for one-to-many relations the local key
/// is always the parent's primary-key attribute.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Link {
    pub foreign_key: &'static str,
    pub local_key: &'static str,
}

impl Link {
    #[must_use]
    pub const fn new(foreign_key: &'static str, local_key: &'static str) -> Self {
        Self {
            foreign_key,
            local_key,
        }
    }
}

/// Constructor for fresh, unsaved child records of a relation.
pub type ChildCtor = fn() -> Box<dyn Record>;

// Monomorphized constructor referenced from the static relation tables.
fn make_child<C: RecordKind>() -> Box<dyn Record> {
    Box::new(C::default())
}

///
/// RelationSpec
///
/// One entry of a parent type's static relation table: relation name, input
/// scope key, link descriptor, reconciliation flag, and a child constructor.
///
/// Relations are declared explicitly at type-definition time; there is no
/// runtime name derivation. Per-instance state is materialized lazily from
/// this table on first access.
///

#[derive(Clone, Copy)]
pub struct RelationSpec {
    pub name: &'static str,
    pub scope: &'static str,
    pub link: Link,
    pub keep_updated: bool,
    pub new_child: ChildCtor,
}

impl RelationSpec {
    /// Declare a one-to-many relation over child type `C`.
    ///
    /// The input scope defaults to the child's conventional record name and
    /// the relation participates in reconciliation.
    #[must_use]
    pub const fn of<C: RecordKind>(name: &'static str, link: Link) -> Self {
        Self {
            name,
            scope: C::RECORD_NAME,
            link,
            keep_updated: true,
            new_child: make_child::<C>,
        }
    }

    /// Override the input scope key bulk payload rows arrive under.
    #[must_use]
    pub const fn with_scope(mut self, scope: &'static str) -> Self {
        self.scope = scope;
        self
    }

    /// Declare the relation as manually managed: it can be assigned, read,
    /// cloned, and filtered, but reconciliation entry points reject it.
    #[must_use]
    pub const fn manual(mut self) -> Self {
        self.keep_updated = false;
        self
    }
}

impl fmt::Debug for RelationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationSpec")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("link", &self.link)
            .field("keep_updated", &self.keep_updated)
            .finish_non_exhaustive()
    }
}

///
/// RelationModel
///
/// Static relation table declared on a parent record type.
///

pub trait RelationModel {
    const RELATIONS: &'static [RelationSpec];

    /// Look up a declared relation by name.
    #[must_use]
    fn relation(name: &str) -> Option<&'static RelationSpec> {
        Self::RELATIONS.iter().find(|spec| spec.name == name)
    }
}

///
/// TESTS
///
