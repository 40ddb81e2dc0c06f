//! Per-page state: query, selection, and bulk actions for one entity
//! list.
//!
//! The controller owns the mutable page state and hands immutable
//! query snapshots to the cache. Changing the query never clears the
//! selection; only explicit user action, a successful bulk mutation,
//! or leaving the page does.

use std::sync::Arc;

use crate::actions::{ActionOutcome, BulkAction, BulkDispatcher, DispatchError, Disposition};
use crate::cache::{CacheError, ResultCache};
use crate::filter::{
    FilterError, FilterOperator, FilterPredicate, QueryState, Scalar, StatusFilter,
};
use crate::model::{Entity, Record};
use crate::registry::{entity_def, EntityDef};
use crate::selection::{SelectionSet, SelectionState};

pub struct PageController {
    entity: Entity,
    def: &'static EntityDef,
    query: QueryState,
    selection: SelectionSet,
    dispatcher: BulkDispatcher,
    cache: Arc<ResultCache>,
    last_rows: Arc<Vec<Record>>,
}

impl PageController {
    #[must_use]
    pub fn new(entity: Entity, cache: Arc<ResultCache>, dispatcher: BulkDispatcher) -> Self {
        Self {
            entity,
            def: entity_def(entity),
            query: QueryState::default(),
            selection: SelectionSet::new(),
            dispatcher,
            cache,
            last_rows: Arc::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    #[must_use]
    pub const fn definition(&self) -> &'static EntityDef {
        self.def
    }

    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Rows from the most recent `rows()` call.
    #[must_use]
    pub fn last_rows(&self) -> &[Record] {
        &self.last_rows
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status_filter = filter;
    }

    /// Append a predicate row for a declared field. Returns its index.
    pub fn add_predicate(&mut self, field: &str) -> Result<usize, FilterError> {
        let predicate = FilterPredicate::new(self.def, field)?;
        self.query.predicates.push(predicate);
        Ok(self.query.predicates.len().saturating_sub(1))
    }

    pub fn set_predicate_field(&mut self, index: usize, field: &str) -> Result<(), FilterError> {
        let def = self.def;
        self.predicate_mut(index)?.set_field(def, field)
    }

    pub fn set_predicate_operator(
        &mut self,
        index: usize,
        operator: FilterOperator,
    ) -> Result<(), FilterError> {
        self.predicate_mut(index)?.set_operator(operator)
    }

    pub fn set_predicate_value(
        &mut self,
        index: usize,
        value: Option<Scalar>,
    ) -> Result<(), FilterError> {
        self.predicate_mut(index)?.set_value(value)
    }

    pub fn set_predicate_value2(
        &mut self,
        index: usize,
        value2: Option<Scalar>,
    ) -> Result<(), FilterError> {
        self.predicate_mut(index)?.set_value2(value2)
    }

    pub fn remove_predicate(&mut self, index: usize) -> Result<(), FilterError> {
        if index >= self.query.predicates.len() {
            return Err(FilterError::NoSuchPredicate(index));
        }
        self.query.predicates.remove(index);
        Ok(())
    }

    pub fn clear_predicates(&mut self) {
        self.query.predicates.clear();
    }

    fn predicate_mut(&mut self, index: usize) -> Result<&mut FilterPredicate, FilterError> {
        self.query
            .predicates
            .get_mut(index)
            .ok_or(FilterError::NoSuchPredicate(index))
    }

    /// Fetch the rows for the current query through the cache and
    /// remember them for selection and bulk-action use.
    pub async fn rows(&mut self) -> Result<Arc<Vec<Record>>, CacheError> {
        let rows = self.cache.rows(self.entity, &self.query).await?;
        self.last_rows = Arc::clone(&rows);
        Ok(rows)
    }

    pub fn toggle(&mut self, id: &str, checked: bool) {
        self.selection.toggle(id, checked);
    }

    /// Select or clear exactly the rows of the last fetch.
    pub fn select_all(&mut self, checked: bool) {
        let ids: Vec<String> = self
            .last_rows
            .iter()
            .map(|row| row.id().to_string())
            .collect();
        self.selection.select_all(checked, &ids);
    }

    /// Header checkbox state against the last fetched row count.
    #[must_use]
    pub fn header_state(&self) -> SelectionState {
        self.selection.tri_state(self.last_rows.len())
    }

    pub async fn request_action(
        &mut self,
        action: BulkAction,
    ) -> Result<Disposition, DispatchError> {
        self.dispatcher
            .request(action, &mut self.selection, &self.last_rows)
            .await
    }

    pub async fn confirm_action(&mut self) -> Result<ActionOutcome, DispatchError> {
        self.dispatcher
            .confirm(&mut self.selection, &self.last_rows)
            .await
    }

    pub fn cancel_action(&mut self) {
        self.dispatcher.cancel();
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<&BulkAction> {
        self.dispatcher.pending()
    }

    /// Navigation away: drop the selection and any parked action.
    pub fn leave(&mut self) {
        self.selection.clear();
        self.dispatcher.cancel();
    }
}
