use std::cmp::Ordering;

use chrono::NaiveDate;

use super::ast::{CmpOp, Comparison, FilterExpr, Scalar};
use crate::model::Record;

/// Evaluate a compiled filter against one record.
#[must_use]
pub fn evaluate(filter: &FilterExpr, record: &Record) -> bool {
    match filter {
        FilterExpr::And(left, right) => evaluate(left, record) && evaluate(right, record),
        FilterExpr::Or(left, right) => evaluate(left, record) || evaluate(right, record),
        FilterExpr::Not(inner) => !evaluate(inner, record),
        FilterExpr::Cmp(comparison) => evaluate_comparison(comparison, record),
        FilterExpr::Null(field) => record.field_value(field).is_none(),
    }
}

fn evaluate_comparison(comparison: &Comparison, record: &Record) -> bool {
    match record.field_value(&comparison.field) {
        Some(Scalar::Text(s)) => evaluate_text(comparison.op, &s, &comparison.value),
        Some(Scalar::Number(n)) => evaluate_number(comparison.op, n, &comparison.value),
        Some(Scalar::Date(d)) => evaluate_date(comparison.op, d, &comparison.value),
        Some(Scalar::Bool(b)) => evaluate_bool(comparison.op, b, &comparison.value),
        // An absent value matches nothing; only Null checks see it
        None => false,
    }
}

fn evaluate_text(op: CmpOp, field_value: &str, query_value: &Scalar) -> bool {
    let field_lower = field_value.to_lowercase();
    match query_value {
        Scalar::Text(s) => {
            let query_lower = s.to_lowercase();
            match op {
                CmpOp::Eq => field_lower == query_lower,
                CmpOp::Contains => field_lower.contains(&query_lower),
                CmpOp::StartsWith => field_lower.starts_with(&query_lower),
                CmpOp::EndsWith => field_lower.ends_with(&query_lower),
                // Lexicographic ordering for completeness
                CmpOp::Gt => field_lower > query_lower,
                CmpOp::Lt => field_lower < query_lower,
                CmpOp::Gte => field_lower >= query_lower,
                CmpOp::Lte => field_lower <= query_lower,
            }
        }
        // Other value types don't match text
        Scalar::Number(_) | Scalar::Date(_) | Scalar::Bool(_) => false,
    }
}

fn evaluate_number(op: CmpOp, field_value: f64, query_value: &Scalar) -> bool {
    match query_value {
        Scalar::Number(n) => {
            let ord = field_value.total_cmp(n);
            match op {
                CmpOp::Eq => ord == Ordering::Equal,
                CmpOp::Gt => ord == Ordering::Greater,
                CmpOp::Lt => ord == Ordering::Less,
                CmpOp::Gte => ord != Ordering::Less,
                CmpOp::Lte => ord != Ordering::Greater,
                // These don't make sense for numbers
                CmpOp::Contains | CmpOp::StartsWith | CmpOp::EndsWith => false,
            }
        }
        // Other value types don't match numbers
        Scalar::Text(_) | Scalar::Date(_) | Scalar::Bool(_) => false,
    }
}

fn evaluate_date(op: CmpOp, field_value: NaiveDate, query_value: &Scalar) -> bool {
    match query_value {
        Scalar::Date(d) => match op {
            CmpOp::Eq => field_value == *d,
            CmpOp::Gt => field_value > *d,
            CmpOp::Lt => field_value < *d,
            CmpOp::Gte => field_value >= *d,
            CmpOp::Lte => field_value <= *d,
            // These don't make sense for dates
            CmpOp::Contains | CmpOp::StartsWith | CmpOp::EndsWith => false,
        },
        // Other value types don't match dates
        Scalar::Text(_) | Scalar::Number(_) | Scalar::Bool(_) => false,
    }
}

fn evaluate_bool(op: CmpOp, field_value: bool, query_value: &Scalar) -> bool {
    match query_value {
        Scalar::Bool(b) => match op {
            CmpOp::Eq => field_value == *b,
            CmpOp::Contains
            | CmpOp::StartsWith
            | CmpOp::EndsWith
            | CmpOp::Gt
            | CmpOp::Lt
            | CmpOp::Gte
            | CmpOp::Lte => false,
        },
        Scalar::Text(_) | Scalar::Number(_) | Scalar::Date(_) => false,
    }
}
