//! # Collection Filters
//!
//! Two cooperating state machines drive the filter UI for a collection's
//! file table:
//!
//! - [`CollectionFilters`] holds the *committed* state: the active filter
//!   chips plus the raw date range, and derives the normalized
//!   [`FilterValues`] consumed as a listing query.
//! - [`FilterDraft`] holds the *uncommitted* state behind the filter
//!   popover: in-progress uploader/status toggles and a draft date range
//!   that only reach the committed layer on apply.
//!
//! Chip ids are derived deterministically from kind and value
//! (`uploader-<v>`, `status-<v>`, `date-<start>-<end>`), so applying the
//! same value twice replaces rather than duplicates, removal works by id
//! alone, and the original value can be recovered from the id.

use std::collections::BTreeSet;

use crate::constants::{DATE_FILTER_PREFIX, STATUS_FILTER_PREFIX, UPLOADER_FILTER_PREFIX};
use crate::models::FileRecord;
use crate::utils::format_date_short;

/// Filter dimension a chip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Uploader,
    Status,
    Date,
}

/// A removable token representing one active filter constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub id: String,
    pub label: String,
    pub kind: FilterKind,
}

impl ActiveFilter {
    pub fn uploader(value: &str) -> Self {
        Self {
            id: format!("{UPLOADER_FILTER_PREFIX}{value}"),
            label: format!("Uploader: {value}"),
            kind: FilterKind::Uploader,
        }
    }

    pub fn status(value: &str) -> Self {
        Self {
            id: format!("{STATUS_FILTER_PREFIX}{value}"),
            label: format!("Status: {value}"),
            kind: FilterKind::Status,
        }
    }

    pub fn date(start: &str, end: &str) -> Self {
        Self {
            id: format!("{DATE_FILTER_PREFIX}{start}-{end}"),
            label: format!("{} \u{2013} {}", format_date_short(start), format_date_short(end)),
            kind: FilterKind::Date,
        }
    }

    /// Recovers the filter value encoded in this chip's id.
    pub fn value(&self) -> &str {
        let prefix = match self.kind {
            FilterKind::Uploader => UPLOADER_FILTER_PREFIX,
            FilterKind::Status => STATUS_FILTER_PREFIX,
            FilterKind::Date => DATE_FILTER_PREFIX,
        };
        self.id.strip_prefix(prefix).unwrap_or(&self.id)
    }
}

/// Raw date-range pair backing a date filter; both endpoints `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// A range only constrains the query when both endpoints are set.
    pub fn is_complete(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    fn clear(&mut self) {
        self.start.clear();
        self.end.clear();
    }
}

/// Normalized query contract derived from the committed filter state.
///
/// Empty dimensions are `None` so callers can distinguish "unconstrained"
/// from "constrained to nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValues {
    pub uploaders: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
    pub date_range: Option<DateRange>,
}

/// Committed filter state for one collection's file table.
#[derive(Debug, Clone, Default)]
pub struct CollectionFilters {
    active: Vec<ActiveFilter>,
    date_range: DateRange,
}

impl CollectionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current filter chips, in application order.
    pub fn active_filters(&self) -> &[ActiveFilter] {
        &self.active
    }

    /// Replaces all uploader and status chips with the given sets.
    ///
    /// A previously applied date chip is preserved untouched. Duplicate
    /// values collapse to a single chip.
    pub fn apply_filters(&mut self, uploaders: &[String], statuses: &[String]) {
        self.active.retain(|f| f.kind == FilterKind::Date);
        for uploader in uploaders {
            self.push_unique(ActiveFilter::uploader(uploader));
        }
        for status in statuses {
            self.push_unique(ActiveFilter::status(status));
        }
    }

    /// Applies a date-range filter, replacing any existing date chip.
    pub fn apply_date_filter(&mut self, start: &str, end: &str) {
        self.date_range = DateRange::new(start, end);
        self.active.retain(|f| f.kind != FilterKind::Date);
        self.push_unique(ActiveFilter::date(start, end));
    }

    /// Removes exactly the chip with the given id.
    ///
    /// Removing a date chip also clears the backing range entirely, so the
    /// derived query loses its date constraint.
    pub fn remove_filter(&mut self, id: &str) {
        if let Some(filter) = self.active.iter().find(|f| f.id == id) {
            if filter.kind == FilterKind::Date {
                self.date_range.clear();
            }
        }
        self.active.retain(|f| f.id != id);
    }

    /// Drops every chip and the backing date range.
    pub fn clear_all(&mut self) {
        self.active.clear();
        self.date_range.clear();
    }

    /// Derives the normalized query contract from the current chips.
    pub fn current_filters(&self) -> FilterValues {
        let values = |kind: FilterKind| {
            let collected: Vec<String> = self
                .active
                .iter()
                .filter(|f| f.kind == kind)
                .map(|f| f.value().to_string())
                .collect();
            (!collected.is_empty()).then_some(collected)
        };
        FilterValues {
            uploaders: values(FilterKind::Uploader),
            statuses: values(FilterKind::Status),
            date_range: self
                .date_range
                .is_complete()
                .then(|| self.date_range.clone()),
        }
    }

    fn push_unique(&mut self, filter: ActiveFilter) {
        if !self.active.iter().any(|f| f.id == filter.id) {
            self.active.push(filter);
        }
    }
}

/// Uploaders offered by the filter UI: owners present in the current
/// listing, de-duplicated and sorted.
pub fn available_uploaders(files: &[FileRecord]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.owner.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Uncommitted filter selections behind the filter popover.
///
/// Drafts track what the user has toggled but not yet applied; they reach
/// the committed [`CollectionFilters`] only through [`FilterDraft::apply_to`].
#[derive(Debug, Clone, Default)]
pub struct FilterDraft {
    selected_uploaders: Vec<String>,
    selected_statuses: Vec<String>,
    date_range: DateRange,
    is_open: bool,
}

impl FilterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_uploaders(&self) -> &[String] {
        &self.selected_uploaders
    }

    pub fn selected_statuses(&self) -> &[String] {
        &self.selected_statuses
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub fn set_date_range(&mut self, start: &str, end: &str) {
        self.date_range = DateRange::new(start, end);
    }

    /// Flips draft membership of one uploader.
    pub fn toggle_uploader(&mut self, uploader: &str) {
        toggle_membership(&mut self.selected_uploaders, uploader);
    }

    /// Flips draft membership of one status.
    pub fn toggle_status(&mut self, status: &str) {
        toggle_membership(&mut self.selected_statuses, status);
    }

    /// Commits the draft to the given filter state and closes the popover.
    ///
    /// The draft date range is only pushed when both endpoints are set.
    pub fn apply_to(&mut self, filters: &mut CollectionFilters) {
        filters.apply_filters(&self.selected_uploaders, &self.selected_statuses);
        if self.date_range.is_complete() {
            filters.apply_date_filter(&self.date_range.start, &self.date_range.end);
        }
        self.is_open = false;
    }

    /// Removes a committed chip while keeping the draft consistent with it.
    ///
    /// Mirrors the committed layer's per-kind clearing: the corresponding
    /// draft selection is dropped before the chip itself is removed.
    pub fn remove_filter(&mut self, id: &str, filters: &mut CollectionFilters) {
        if let Some(filter) = filters.active_filters().iter().find(|f| f.id == id) {
            match filter.kind {
                FilterKind::Uploader => {
                    let value = filter.value().to_string();
                    self.selected_uploaders.retain(|u| *u != value);
                }
                FilterKind::Status => {
                    let value = filter.value().to_string();
                    self.selected_statuses.retain(|s| *s != value);
                }
                FilterKind::Date => self.date_range.clear(),
            }
        }
        filters.remove_filter(id);
    }

    /// Resets every draft dimension without touching committed state.
    pub fn clear_all(&mut self) {
        self.selected_uploaders.clear();
        self.selected_statuses.clear();
        self.date_range.clear();
    }
}

fn toggle_membership(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(owner: &str) -> FileRecord {
        FileRecord {
            object_name: format!("{owner}-file"),
            collection: "docs".into(),
            owner: owner.into(),
            original_filename: "f".into(),
            upload_time: "2024-03-01T00:00:00Z".into(),
            content_type: "text/plain".into(),
            size: 1,
            metadata: Default::default(),
        }
    }

    #[test]
    fn apply_replaces_uploader_and_status_chips_but_keeps_date() {
        let mut filters = CollectionFilters::new();
        filters.apply_date_filter("2024-01-01", "2024-01-31");
        filters.apply_filters(&["a@x.com".into()], &["Done".into()]);
        filters.apply_filters(&["b@x.com".into()], &[]);

        let ids: Vec<&str> = filters.active_filters().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["date-2024-01-01-2024-01-31", "uploader-b@x.com"]);
    }

    #[test]
    fn second_date_filter_replaces_the_first() {
        let mut filters = CollectionFilters::new();
        filters.apply_date_filter("2024-01-01", "2024-01-31");
        filters.apply_date_filter("2024-02-01", "2024-02-29");

        let dates: Vec<&ActiveFilter> = filters
            .active_filters()
            .iter()
            .filter(|f| f.kind == FilterKind::Date)
            .collect();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].id, "date-2024-02-01-2024-02-29");
        assert_eq!(
            filters.current_filters().date_range,
            Some(DateRange::new("2024-02-01", "2024-02-29"))
        );
    }

    #[test]
    fn removing_date_chip_clears_backing_range() {
        let mut filters = CollectionFilters::new();
        filters.apply_filters(&["a@x.com".into()], &[]);
        filters.apply_date_filter("2024-01-01", "2024-01-31");

        filters.remove_filter("date-2024-01-01-2024-01-31");

        assert_eq!(filters.active_filters().len(), 1);
        assert_eq!(filters.current_filters().date_range, None);
        // Other dimensions untouched.
        assert_eq!(
            filters.current_filters().uploaders,
            Some(vec!["a@x.com".to_string()])
        );
    }

    #[test]
    fn removing_one_chip_leaves_the_rest() {
        let mut filters = CollectionFilters::new();
        filters.apply_filters(&["a@x.com".into(), "b@x.com".into()], &["Done".into()]);
        filters.remove_filter("uploader-a@x.com");

        let ids: Vec<&str> = filters.active_filters().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["uploader-b@x.com", "status-Done"]);
    }

    #[test]
    fn empty_dimensions_derive_to_none() {
        let filters = CollectionFilters::new();
        assert_eq!(filters.current_filters(), FilterValues::default());
    }

    #[test]
    fn chip_ids_round_trip_their_values() {
        assert_eq!(ActiveFilter::uploader("sam@example.com").value(), "sam@example.com");
        assert_eq!(ActiveFilter::status("In progress").value(), "In progress");
        assert_eq!(
            ActiveFilter::date("2024-01-01", "2024-01-31").value(),
            "2024-01-01-2024-01-31"
        );
    }

    #[test]
    fn date_chip_label_uses_short_format_with_en_dash() {
        let chip = ActiveFilter::date("2024-01-01", "2024-01-31");
        assert_eq!(chip.label, "1 Jan 2024 \u{2013} 31 Jan 2024");
    }

    #[test]
    fn available_uploaders_sorted_and_deduped() {
        let files = vec![file("zoe@x.com"), file("amy@x.com"), file("zoe@x.com")];
        assert_eq!(available_uploaders(&files), vec!["amy@x.com", "zoe@x.com"]);
    }

    #[test]
    fn draft_toggles_flip_membership() {
        let mut draft = FilterDraft::new();
        draft.toggle_uploader("a@x.com");
        draft.toggle_uploader("b@x.com");
        draft.toggle_uploader("a@x.com");
        assert_eq!(draft.selected_uploaders(), ["b@x.com"]);
    }

    #[test]
    fn draft_apply_pushes_selections_and_closes_popover() {
        let mut filters = CollectionFilters::new();
        let mut draft = FilterDraft::new();
        draft.set_open(true);
        draft.toggle_uploader("a@x.com");
        draft.toggle_status("Done");
        // Incomplete range must not be pushed.
        draft.set_date_range("2024-01-01", "");

        draft.apply_to(&mut filters);

        assert!(!draft.is_open());
        let ids: Vec<&str> = filters.active_filters().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["uploader-a@x.com", "status-Done"]);

        draft.set_date_range("2024-01-01", "2024-01-31");
        draft.apply_to(&mut filters);
        assert!(filters.current_filters().date_range.is_some());
    }

    #[test]
    fn draft_mirrors_external_chip_removal() {
        let mut filters = CollectionFilters::new();
        let mut draft = FilterDraft::new();
        draft.toggle_uploader("a@x.com");
        draft.set_date_range("2024-01-01", "2024-01-31");
        draft.apply_to(&mut filters);

        draft.remove_filter("uploader-a@x.com", &mut filters);
        assert!(draft.selected_uploaders().is_empty());

        draft.remove_filter("date-2024-01-01-2024-01-31", &mut filters);
        assert!(!draft.date_range().is_complete());
        assert!(filters.active_filters().is_empty());
    }

    #[test]
    fn draft_clear_leaves_committed_state_alone() {
        let mut filters = CollectionFilters::new();
        let mut draft = FilterDraft::new();
        draft.toggle_status("Done");
        draft.apply_to(&mut filters);

        draft.clear_all();
        assert!(draft.selected_statuses().is_empty());
        assert_eq!(filters.active_filters().len(), 1);
    }
}
