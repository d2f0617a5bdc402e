//! # Table Row Selection
//!
//! Selection state machine for tabular UIs, keyed by file object names.
//! Supports two operating modes chosen at construction:
//!
//! - **Owned**: the machine holds the selection itself and every mutator
//!   updates it in place.
//! - **Controlled**: the authoritative selection lives with a parent.
//!   Mutators compute the next set from the last synced snapshot and hand it
//!   to the change callback; the parent is expected to push the accepted
//!   value back through [`TableSelection::sync`].
//!
//! In both modes the "next state" computation is identical; the modes only
//! differ in where that next state is written.

use std::collections::BTreeSet;

type SelectionChanged = Box<dyn FnMut(&BTreeSet<String>) + Send>;

enum Mode {
    Owned,
    Controlled { on_change: SelectionChanged },
}

/// Selection state machine for a file table.
pub struct TableSelection {
    selected: BTreeSet<String>,
    mode: Mode,
}

impl Default for TableSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSelection {
    /// An owned-mode machine starting from an empty selection.
    pub fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
            mode: Mode::Owned,
        }
    }

    /// A controlled-mode machine reporting every change to `on_change`.
    pub fn controlled<F>(on_change: F) -> Self
    where
        F: FnMut(&BTreeSet<String>) + Send + 'static,
    {
        Self {
            selected: BTreeSet::new(),
            mode: Mode::Controlled {
                on_change: Box::new(on_change),
            },
        }
    }

    /// Refreshes the snapshot of the externally owned selection.
    ///
    /// Only meaningful in controlled mode; owned mode ignores it because the
    /// machine is its own source of truth.
    pub fn sync(&mut self, external: BTreeSet<String>) {
        if matches!(self.mode, Mode::Controlled { .. }) {
            self.selected = external;
        }
    }

    /// The selection the machine currently sees.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Flips selection of a single row.
    pub fn toggle_item(&mut self, id: &str) {
        let mut next = self.selected.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        self.commit(next);
    }

    /// All-or-nothing toggle over the given rows.
    ///
    /// When every id is already selected the result is the empty set;
    /// otherwise the result is exactly `all_ids`, discarding any selection
    /// outside it.
    pub fn toggle_all(&mut self, all_ids: &[String]) {
        let next = if all_ids.iter().all(|id| self.selected.contains(id)) {
            BTreeSet::new()
        } else {
            all_ids.iter().cloned().collect()
        };
        self.commit(next);
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.commit(BTreeSet::new());
    }

    /// Whether every given id is selected; empty input is never "all".
    pub fn are_all_selected(&self, all_ids: &[String]) -> bool {
        !all_ids.is_empty() && all_ids.iter().all(|id| self.selected.contains(id))
    }

    /// Whether the selection strictly partially covers the given ids.
    pub fn are_some_selected(&self, all_ids: &[String]) -> bool {
        if all_ids.is_empty() {
            return false;
        }
        let any = all_ids.iter().any(|id| self.selected.contains(id));
        any && !self.are_all_selected(all_ids)
    }

    fn commit(&mut self, next: BTreeSet<String>) {
        match &mut self.mode {
            Mode::Owned => self.selected = next,
            Mode::Controlled { on_change } => on_change(&next),
        }
    }
}
