use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::registry::FieldKind;

/// A typed value a field resolves to, or a predicate compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Scalar {
    /// Whether this value is usable with a field of the given kind.
    /// Select fields compare as text.
    #[must_use]
    pub const fn matches_kind(&self, kind: FieldKind) -> bool {
        match self {
            Self::Text(_) => matches!(kind, FieldKind::Text | FieldKind::Select),
            Self::Number(_) => matches!(kind, FieldKind::Number),
            Self::Date(_) => matches!(kind, FieldKind::Date),
            Self::Bool(_) => matches!(kind, FieldKind::Bool),
        }
    }
}

/// A compiled, immutable filter over one entity's records.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
    Cmp(Comparison),
    /// Matches records where the field resolves to no value.
    Null(String),
}

/// A single field comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub field: String,
    pub op: CmpOp,
    pub value: Scalar,
}

/// Comparison operators in compiled filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl FilterExpr {
    /// Convenience constructor for a comparison leaf.
    #[must_use]
    pub fn cmp(field: impl Into<String>, op: CmpOp, value: Scalar) -> Self {
        Self::Cmp(Comparison {
            field: field.into(),
            op,
            value,
        })
    }

    /// Left-associative conjunction of fragments; `None` when empty.
    #[must_use]
    pub fn and_all(fragments: Vec<Self>) -> Option<Self> {
        let mut iter = fragments.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, next| Self::And(Box::new(acc), Box::new(next))))
    }

    /// Left-associative disjunction of fragments; `None` when empty.
    #[must_use]
    pub fn or_all(fragments: Vec<Self>) -> Option<Self> {
        let mut iter = fragments.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, next| Self::Or(Box::new(acc), Box::new(next))))
    }
}
