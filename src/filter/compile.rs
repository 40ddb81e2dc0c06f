use super::ast::{CmpOp, FilterExpr, Scalar};
use super::predicate::{FilterOperator, FilterPredicate};
use super::{QueryState, StatusFilter};
use crate::registry::EntityDef;

/// Compile a page's query state into one composed filter.
///
/// Fragment order is fixed: status, then free-text search, then active
/// predicates in row order. Conjunction is commutative so the order
/// never changes the result set, but it must stay deterministic because
/// the serialized state doubles as a cache key. With nothing active the
/// result is `None`, meaning match-all.
#[must_use]
pub fn compile(state: &QueryState, def: &EntityDef) -> Option<FilterExpr> {
    let mut fragments = Vec::new();
    if let StatusFilter::Only(status) = &state.status_filter {
        fragments.push(FilterExpr::cmp(
            "status",
            CmpOp::Eq,
            Scalar::Text(status.clone()),
        ));
    }
    if let Some(search) = search_fragment(&state.search_term, def) {
        fragments.push(search);
    }
    for predicate in &state.predicates {
        if let Some(fragment) = predicate_fragment(predicate) {
            fragments.push(fragment);
        }
    }
    FilterExpr::and_all(fragments)
}

/// The search box matches any of the entity's search fields as a
/// case-insensitive substring.
fn search_fragment(term: &str, def: &EntityDef) -> Option<FilterExpr> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    let branches = def
        .search_fields
        .iter()
        .map(|field| FilterExpr::cmp(*field, CmpOp::Contains, Scalar::Text(term.to_string())))
        .collect();
    FilterExpr::or_all(branches)
}

fn predicate_fragment(predicate: &FilterPredicate) -> Option<FilterExpr> {
    if !predicate.is_active() {
        return None;
    }
    let field = predicate.field().to_string();
    match predicate.operator() {
        FilterOperator::Contains => comparison(field, CmpOp::Contains, predicate),
        FilterOperator::NotContains => {
            let value = predicate.value()?.clone();
            Some(FilterExpr::Not(Box::new(FilterExpr::cmp(
                field,
                CmpOp::Contains,
                value,
            ))))
        }
        FilterOperator::Equals => comparison(field, CmpOp::Eq, predicate),
        FilterOperator::StartsWith => comparison(field, CmpOp::StartsWith, predicate),
        FilterOperator::EndsWith => comparison(field, CmpOp::EndsWith, predicate),
        FilterOperator::GreaterThan | FilterOperator::After => {
            comparison(field, CmpOp::Gt, predicate)
        }
        FilterOperator::LessThan | FilterOperator::Before => {
            comparison(field, CmpOp::Lt, predicate)
        }
        FilterOperator::GreaterEqual => comparison(field, CmpOp::Gte, predicate),
        FilterOperator::LessEqual => comparison(field, CmpOp::Lte, predicate),
        FilterOperator::Between => {
            let low = predicate.value()?.clone();
            let high = predicate.value2()?.clone();
            Some(FilterExpr::And(
                Box::new(FilterExpr::cmp(field.clone(), CmpOp::Gte, low)),
                Box::new(FilterExpr::cmp(field, CmpOp::Lte, high)),
            ))
        }
        FilterOperator::IsEmpty => Some(FilterExpr::Null(field)),
        FilterOperator::IsNotEmpty => Some(FilterExpr::Not(Box::new(FilterExpr::Null(field)))),
    }
}

fn comparison(field: String, op: CmpOp, predicate: &FilterPredicate) -> Option<FilterExpr> {
    Some(FilterExpr::cmp(field, op, predicate.value()?.clone()))
}
