//! Row selection for bulk actions.

use std::collections::BTreeSet;

/// What the header checkbox should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

/// The set of selected row identifiers on one list page.
///
/// Selection is a snapshot: selecting all captures the identifiers
/// loaded right now and does not track rows that appear later. Ordered
/// storage keeps `ids()` deterministic for action execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Add or remove a single row.
    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            self.ids.insert(id.to_string());
        } else {
            self.ids.remove(id);
        }
    }

    /// Header checkbox: checked replaces the selection with exactly the
    /// currently loaded identifiers, unchecked empties it.
    pub fn select_all(&mut self, checked: bool, current_ids: &[String]) {
        self.ids.clear();
        if checked {
            self.ids.extend(current_ids.iter().cloned());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected identifiers in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Tri-state for the header checkbox given how many rows are
    /// currently loaded.
    #[must_use]
    pub fn tri_state(&self, loaded: usize) -> SelectionState {
        if self.ids.is_empty() {
            SelectionState::None
        } else if self.ids.len() == loaded {
            SelectionState::All
        } else {
            SelectionState::Partial
        }
    }
}
