//! Column filtering: predicate rows, query compilation, evaluation.
//!
//! A list page owns a [`QueryState`] (search box, status quick-filter,
//! advanced filter rows). [`compile`] folds the active parts into one
//! immutable [`FilterExpr`]; [`evaluate`] runs that expression against
//! typed records. Predicate construction is closed-world: fields,
//! operators and value types are validated against the entity registry
//! at edit time, so compilation never fails.

mod ast;
mod compile;
mod evaluator;
mod predicate;

use serde::Serialize;
use thiserror::Error;

pub use ast::{CmpOp, Comparison, FilterExpr, Scalar};
pub use compile::compile;
pub use evaluator::evaluate;
pub use predicate::{default_operator, operators_for, FilterOperator, FilterPredicate};

use crate::model::Entity;
use crate::registry::FieldKind;

/// Errors from building or editing filter predicates.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("unknown field `{field}` for {entity}")]
    UnknownField { entity: Entity, field: String },

    #[error("operator {operator} does not apply to {kind} fields")]
    OperatorMismatch {
        operator: FilterOperator,
        kind: FieldKind,
    },

    #[error("value does not match the {kind} field `{field}`")]
    ValueMismatch { field: String, kind: FieldKind },

    #[error("no filter row at index {0}")]
    NoSuchPredicate(usize),
}

/// Status quick-filter above the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

/// Everything that narrows a list page's rows.
///
/// The serialized form is the cache fingerprint, so field order and
/// representation changes invalidate cached results by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryState {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub predicates: Vec<FilterPredicate>,
}
