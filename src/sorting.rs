//! # File Sorting
//!
//! Stable multi-field sorting for the file table. Direction flips when the
//! same field is chosen again and resets to descending when the field
//! changes; ties preserve the incoming order.

use crate::models::FileRecord;
use crate::utils::upload_time_sort_key;

/// Sortable columns of the file table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Status,
    Uploader,
    Date,
}

impl SortField {
    /// All fields, in the order the UI offers them.
    pub const ALL: [SortField; 3] = [SortField::Status, SortField::Uploader, SortField::Date];
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Status => "Status",
            Self::Uploader => "Uploader",
            Self::Date => "Date",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort state machine for the file table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSorter {
    pub sort_by: SortField,
    pub direction: SortDirection,
}

impl Default for FileSorter {
    fn default() -> Self {
        Self {
            sort_by: SortField::Status,
            direction: SortDirection::Desc,
        }
    }
}

impl FileSorter {
    pub fn new(sort_by: SortField, direction: SortDirection) -> Self {
        Self { sort_by, direction }
    }

    /// Reacts to a column header click.
    ///
    /// Selecting the current field flips the direction; selecting a new
    /// field switches to it and resets the direction to descending.
    pub fn handle_sort_change(&mut self, field: SortField) {
        if field == self.sort_by {
            self.direction = self.direction.toggled();
        } else {
            self.sort_by = field;
            self.direction = SortDirection::Desc;
        }
    }

    /// Returns the files sorted under the current state.
    ///
    /// The sort is stable: records with equal keys keep their incoming
    /// relative order. Comparator semantics per field:
    ///
    /// - `Status`: case-insensitive; missing statuses compare as the
    ///   default in-progress status
    /// - `Uploader`: case-insensitive on owner; missing owner is empty
    /// - `Date`: parsed timestamp; unparseable values compare as the epoch
    pub fn sorted(&self, files: &[FileRecord]) -> Vec<FileRecord> {
        let mut out = files.to_vec();
        match self.sort_by {
            SortField::Status => out.sort_by(|a, b| {
                self.ordered(a.status().to_lowercase().cmp(&b.status().to_lowercase()))
            }),
            SortField::Uploader => out.sort_by(|a, b| {
                self.ordered(a.owner.to_lowercase().cmp(&b.owner.to_lowercase()))
            }),
            SortField::Date => out.sort_by(|a, b| {
                self.ordered(
                    upload_time_sort_key(&a.upload_time).cmp(&upload_time_sort_key(&b.upload_time)),
                )
            }),
        }
        out
    }

    fn ordered(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(object_name: &str, status: Option<&str>, owner: &str, upload_time: &str) -> FileRecord {
        FileRecord {
            object_name: object_name.into(),
            collection: "docs".into(),
            owner: owner.into(),
            original_filename: object_name.into(),
            upload_time: upload_time.into(),
            content_type: "text/plain".into(),
            size: 1,
            metadata: crate::models::FileMetadata {
                status: status.map(str::to_string),
                extra: Default::default(),
            },
        }
    }

    fn names(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(|f| f.object_name.as_str()).collect()
    }

    #[test]
    fn status_sort_descending_and_ascending() {
        let files = vec![
            file("a", Some("Done"), "x", "2024-01-01T00:00:00Z"),
            file("b", Some("In progress"), "x", "2024-01-01T00:00:00Z"),
            file("c", Some("Review"), "x", "2024-01-01T00:00:00Z"),
        ];
        let sorter = FileSorter::new(SortField::Status, SortDirection::Desc);
        assert_eq!(names(&sorter.sorted(&files)), ["c", "b", "a"]);

        let sorter = FileSorter::new(SortField::Status, SortDirection::Asc);
        assert_eq!(names(&sorter.sorted(&files)), ["a", "b", "c"]);
    }

    #[test]
    fn missing_status_sorts_as_in_progress() {
        let files = vec![
            file("done", Some("Done"), "x", "2024-01-01T00:00:00Z"),
            file("blank", None, "x", "2024-01-01T00:00:00Z"),
            file("review", Some("Review"), "x", "2024-01-01T00:00:00Z"),
        ];
        let sorter = FileSorter::new(SortField::Status, SortDirection::Asc);
        assert_eq!(names(&sorter.sorted(&files)), ["done", "blank", "review"]);
    }

    #[test]
    fn uploader_sort_is_case_insensitive() {
        let files = vec![
            file("a", None, "Zoe@x.com", "2024-01-01T00:00:00Z"),
            file("b", None, "amy@x.com", "2024-01-01T00:00:00Z"),
        ];
        let sorter = FileSorter::new(SortField::Uploader, SortDirection::Asc);
        assert_eq!(names(&sorter.sorted(&files)), ["b", "a"]);
    }

    #[test]
    fn unparseable_date_sorts_first_ascending_last_descending() {
        let files = vec![
            file("new", None, "x", "2024-06-01T00:00:00Z"),
            file("bad", None, "x", "not-a-date"),
            file("old", None, "x", "2024-01-01T00:00:00Z"),
        ];
        let mut sorter = FileSorter::new(SortField::Date, SortDirection::Asc);
        assert_eq!(names(&sorter.sorted(&files)), ["bad", "old", "new"]);
        sorter.direction = SortDirection::Desc;
        assert_eq!(names(&sorter.sorted(&files)), ["new", "old", "bad"]);
    }

    #[test]
    fn equal_keys_keep_incoming_order() {
        let files = vec![
            file("first", Some("Done"), "x", "2024-01-01T00:00:00Z"),
            file("second", Some("done"), "x", "2024-02-01T00:00:00Z"),
            file("third", Some("DONE"), "x", "2024-03-01T00:00:00Z"),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorter = FileSorter::new(SortField::Status, direction);
            assert_eq!(names(&sorter.sorted(&files)), ["first", "second", "third"]);
        }
    }

    #[test]
    fn sort_change_toggles_same_field_and_resets_new_field() {
        let mut sorter = FileSorter::default();
        assert_eq!(sorter.sort_by, SortField::Status);
        assert_eq!(sorter.direction, SortDirection::Desc);

        sorter.handle_sort_change(SortField::Status);
        assert_eq!(sorter.direction, SortDirection::Asc);
        sorter.handle_sort_change(SortField::Status);
        assert_eq!(sorter.direction, SortDirection::Desc);

        sorter.handle_sort_change(SortField::Status);
        sorter.handle_sort_change(SortField::Date);
        assert_eq!(sorter.sort_by, SortField::Date);
        assert_eq!(sorter.direction, SortDirection::Desc);
    }
}
