//! Entity registry: the closed world of filterable fields.
//!
//! Every list page works off one [`EntityDef`]: which fields can be
//! filtered and how, which fields the free-text search matches, which
//! status values are legal, which email fields bulk mail reads, and the
//! default sort. Relation identifiers (`city_id` and friends) are
//! deliberately not listed; hydrated display fields stand in for them.

mod defs;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Entity;

/// Field kinds the filter machinery distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select,
    Bool,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filterable field of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Legal values for select fields; empty otherwise.
    pub options: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Default ordering applied to every fetch of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Everything the generic page machinery knows about one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntityDef {
    pub entity: Entity,
    pub fields: &'static [FieldDef],
    /// Fields the free-text search matches, OR-composed.
    pub search_fields: &'static [&'static str],
    /// Legal status values; empty when the entity has no status column.
    pub statuses: &'static [&'static str],
    /// Email fields bulk mail reads, in priority order.
    pub contact_fields: &'static [&'static str],
    pub default_sort: SortSpec,
}

impl EntityDef {
    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `status` is a legal status value for this entity.
    #[must_use]
    pub fn has_status(&self, status: &str) -> bool {
        self.statuses.contains(&status)
    }
}

/// Resolve the definition for an entity.
#[must_use]
pub fn entity_def(entity: Entity) -> &'static EntityDef {
    defs::lookup(entity)
}
