//! # File Action Dialogs
//!
//! Confirm-dialog lifecycle for the destructive and semi-destructive row
//! actions (delete, archive). Each action kind owns an independent dialog
//! slice with three states:
//!
//! ```text
//! Closed -> OpenIdle    on request_<action>(file)
//! OpenIdle -> OpenLoading  on confirm
//! OpenLoading -> Closed    on settle (success or failure, uniformly)
//! OpenIdle -> Closed       on cancel
//! ```
//!
//! There is no transition from loading back to idle: a settled confirm
//! always closes the dialog, and the caller-supplied refetch runs exactly
//! once on success. Service errors are returned to the caller after the
//! dialog has closed, for surfacing as a transient notification.

use crate::client::ApiResponse;
use crate::errors::ServiceResult;
use crate::files::FilesService;
use crate::models::FileRecord;

/// One confirm dialog's state.
///
/// A closed dialog never carries a target file or a loading flag; the only
/// way to observe `file` is through an open dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmDialog {
    open: bool,
    file: Option<FileRecord>,
    is_loading: bool,
}

impl ConfirmDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn file(&self) -> Option<&FileRecord> {
        self.file.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn request(&mut self, file: FileRecord) {
        self.open = true;
        self.file = Some(file);
        self.is_loading = false;
    }

    fn begin(&mut self) {
        self.is_loading = true;
    }

    fn close(&mut self) {
        self.open = false;
        self.file = None;
        self.is_loading = false;
    }
}

/// Dialog state for the per-row file actions.
///
/// The delete and archive slices are independent: opening one never affects
/// the other's visibility.
#[derive(Debug, Clone, Default)]
pub struct FileActionDialogs {
    delete: ConfirmDialog,
    archive: ConfirmDialog,
}

impl FileActionDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_dialog(&self) -> &ConfirmDialog {
        &self.delete
    }

    pub fn archive_dialog(&self) -> &ConfirmDialog {
        &self.archive
    }

    /// Opens the delete confirmation for one file.
    pub fn request_delete(&mut self, file: FileRecord) {
        self.delete.request(file);
    }

    /// Opens the archive confirmation for one file.
    pub fn request_archive(&mut self, file: FileRecord) {
        self.archive.request(file);
    }

    /// Closes the delete dialog without touching the file.
    pub fn cancel_delete(&mut self) {
        self.delete.close();
    }

    /// Closes the archive dialog without touching the file.
    pub fn cancel_archive(&mut self) {
        self.archive.close();
    }

    /// Confirms the pending deletion.
    ///
    /// Runs the delete against the open dialog's target, closes the dialog
    /// whichever way the call settles, and invokes `refetch` once on
    /// success. A confirm on a closed dialog is a no-op.
    pub async fn confirm_delete<F>(&mut self, files: &FilesService, refetch: F) -> ServiceResult<()>
    where
        F: FnOnce(),
    {
        let Some(file) = self.delete.file.clone() else {
            return Ok(());
        };
        self.delete.begin();
        let result = files.delete_file(&file.collection, &file.object_name).await;
        self.delete.close();
        if result.is_ok() {
            refetch();
        }
        result
    }

    /// Confirms the pending archival; same lifecycle as
    /// [`FileActionDialogs::confirm_delete`].
    pub async fn confirm_archive<F>(
        &mut self,
        files: &FilesService,
        refetch: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(),
    {
        let Some(file) = self.archive.file.clone() else {
            return Ok(());
        };
        self.archive.begin();
        let result = files.archive_file(&file.collection, &file.object_name).await;
        self.archive.close();
        if result.is_ok() {
            refetch();
        }
        result
    }

    /// Downloads a file directly; no dialog involved.
    pub async fn download(
        &self,
        files: &FilesService,
        file: &FileRecord,
    ) -> ServiceResult<ApiResponse> {
        files.download_file(&file.collection, &file.object_name).await
    }
}
