//! # Files Service
//!
//! Operations on individual files within a collection: upload, listing with
//! client-side filtering and pagination, download, delete, and archive, plus
//! the cross-collection recent-files view.
//!
//! The backend listing endpoint supports neither filtering nor pagination
//! yet, so both are applied client-side over the full listing. Single-target
//! operations propagate typed errors for the UI to surface as notifications;
//! only the recent-files fan-out aggregates failures.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use futures::future::join_all;
use http::Method;
use serde_json::json;
use tracing::warn;

use crate::client::{ApiClient, ApiResponse, RequestOptions};
use crate::errors::{
    fetch_failed_message, forbidden_message, not_found_message, operation_failed_message,
    validation_failed_message, ApiError, ApplicationError, ErrorAction, ServiceError,
    ServiceResult,
};
use crate::filters::FilterValues;
use crate::models::{FileListPage, FileRecord, ListFilesResponse, RecentFiles, User};
use crate::transport::MultipartForm;
use crate::utils::{normalize_upload_time, parse_upload_time, upload_time_sort_key};

/// Service for file operations within collections.
pub struct FilesService {
    api: Arc<ApiClient>,
}

impl FilesService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Uploads a file into a collection as a multipart form.
    ///
    /// The form carries the raw file bytes plus a JSON-encoded metadata
    /// field. The transport chooses its own multipart boundary.
    pub async fn upload_file(
        &self,
        collection: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
        metadata: serde_json::Value,
    ) -> ServiceResult<()> {
        let form = MultipartForm::new()
            .file("file", file_name, content_type, data)
            .text("metadata", metadata.to_string());

        self.api
            .request(
                &format!("/api/files/{collection}"),
                RequestOptions::multipart(form),
            )
            .await
            .map(|_| ())
            .map_err(|err| match err {
                e @ ApiError::Validation { .. } => ApplicationError::new(
                    validation_failed_message("file upload"),
                    ErrorAction::CheckInput,
                    Some(e),
                ),
                e @ ApiError::Forbidden(_) => ApplicationError::new(
                    forbidden_message(&format!("collection \"{collection}\"")),
                    ErrorAction::RequestAccess,
                    Some(e),
                ),
                e => {
                    let details = e.to_string();
                    ApplicationError::new(
                        operation_failed_message("File upload", Some(&details)),
                        ErrorAction::TryAgainOrContactSupport,
                        Some(e),
                    )
                }
            })
    }

    /// Lists a collection's files with client-side filtering and pagination.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `page_size` - rows per page; `None` returns the whole filtered
    ///   listing as a single page
    /// * `filters` - optional normalized filter contract from the filter
    ///   state machine
    pub async fn list_files(
        &self,
        collection: &str,
        page: usize,
        page_size: Option<usize>,
        filters: Option<&FilterValues>,
    ) -> ServiceResult<FileListPage> {
        let listing = self
            .fetch_listing(collection)
            .await
            .map_err(|err| collection_fetch_error(collection, err))?;

        let mut all: Vec<FileRecord> = listing
            .files
            .into_iter()
            .map(|mut file| {
                file.upload_time = normalize_upload_time(&file.upload_time);
                file
            })
            .collect();
        if let Some(filters) = filters {
            all.retain(|file| matches_filters(file, filters));
        }

        let total_count = all.len();
        let page_size = page_size.unwrap_or(total_count).max(1);
        let total_pages = total_count.div_ceil(page_size);
        let current_page = page.max(1);
        let start = (current_page - 1) * page_size;
        let files = if start < total_count {
            all[start..(start + page_size).min(total_count)].to_vec()
        } else {
            Vec::new()
        };

        Ok(FileListPage {
            files,
            total_count,
            total_pages,
            current_page,
            page_size,
        })
    }

    /// Downloads one file; the response is handed back raw for the caller
    /// to consume.
    pub async fn download_file(
        &self,
        collection: &str,
        object_name: &str,
    ) -> ServiceResult<ApiResponse> {
        self.api
            .request(
                &format!("/api/files/{collection}/{object_name}"),
                RequestOptions::default(),
            )
            .await
            .map_err(|err| {
                file_error(object_name, err, |details| {
                    fetch_failed_message(&format!("file \"{object_name}\""), Some(details))
                })
            })
    }

    /// Deletes one file from a collection.
    pub async fn delete_file(&self, collection: &str, object_name: &str) -> ServiceResult<()> {
        self.api
            .request(
                &format!("/api/files/{collection}/{object_name}"),
                RequestOptions::method(Method::DELETE),
            )
            .await
            .map(|_| ())
            .map_err(|err| {
                file_error(object_name, err, |details| {
                    operation_failed_message("File deletion", Some(details))
                })
            })
    }

    /// Archives one file in place.
    pub async fn archive_file(&self, collection: &str, object_name: &str) -> ServiceResult<()> {
        self.api
            .request(
                &format!("/api/files/{collection}/{object_name}"),
                RequestOptions::json(Method::PATCH, json!({ "archived": true })),
            )
            .await
            .map(|_| ())
            .map_err(|err| {
                file_error(object_name, err, |details| {
                    operation_failed_message("File archival", Some(details))
                })
            })
    }

    /// Most recent files across every collection the user can access.
    ///
    /// Fans out one unpaginated listing per collection, settles the whole
    /// batch, and reports per-collection failures alongside the merged,
    /// newest-first result. Never fails as a whole.
    pub async fn recent_files(&self, user: &User, limit: usize) -> RecentFiles {
        let names: Vec<&String> = user.collections.keys().collect();
        let fetches = names.iter().map(|collection| async move {
            match self.list_files(collection, 1, None, None).await {
                Ok(page) => (page.files, None),
                Err(err) => {
                    warn!(collection = %collection, error = %err, "recent files fetch failed");
                    (Vec::new(), Some(ServiceError::from(&err)))
                }
            }
        });

        let mut files = Vec::new();
        let mut errors = Vec::new();
        for (batch, error) in join_all(fetches).await {
            files.extend(batch);
            if let Some(error) = error {
                errors.push(error);
            }
        }

        files.sort_by(|a, b| {
            upload_time_sort_key(&b.upload_time).cmp(&upload_time_sort_key(&a.upload_time))
        });
        files.truncate(limit);

        RecentFiles { files, errors }
    }

    async fn fetch_listing(&self, collection: &str) -> Result<ListFilesResponse, ApiError> {
        let response = self
            .api
            .request(&format!("/api/files/{collection}"), RequestOptions::default())
            .await?;
        match response.into_json() {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::network("failed to decode file listing", e)),
            None => Ok(ListFilesResponse::default()),
        }
    }
}

fn collection_fetch_error(collection: &str, err: ApiError) -> ApplicationError {
    match err {
        e @ ApiError::NotFound(_) => ApplicationError::new(
            not_found_message(&format!("Collection \"{collection}\"")),
            ErrorAction::VerifyExists,
            Some(e),
        ),
        e @ ApiError::Forbidden(_) => ApplicationError::new(
            forbidden_message(&format!("collection \"{collection}\"")),
            ErrorAction::RequestAccess,
            Some(e),
        ),
        e => {
            let details = e.to_string();
            ApplicationError::new(
                fetch_failed_message(&format!("files from \"{collection}\""), Some(&details)),
                ErrorAction::TryAgainOrContactSupport,
                Some(e),
            )
        }
    }
}

fn file_error(
    object_name: &str,
    err: ApiError,
    generic: impl FnOnce(&str) -> String,
) -> ApplicationError {
    match err {
        e @ ApiError::NotFound(_) => ApplicationError::new(
            not_found_message(&format!("File \"{object_name}\"")),
            ErrorAction::VerifyExists,
            Some(e),
        ),
        e @ ApiError::Forbidden(_) => ApplicationError::new(
            forbidden_message(&format!("file \"{object_name}\"")),
            ErrorAction::RequestAccess,
            Some(e),
        ),
        e => {
            let details = e.to_string();
            ApplicationError::new(generic(&details), ErrorAction::TryAgainOrContactSupport, Some(e))
        }
    }
}

/// Whether one file passes every constrained filter dimension.
fn matches_filters(file: &FileRecord, filters: &FilterValues) -> bool {
    if let Some(uploaders) = &filters.uploaders {
        if !uploaders.iter().any(|u| u == &file.owner) {
            return false;
        }
    }
    if let Some(statuses) = &filters.statuses {
        if !statuses.iter().any(|s| s == file.status()) {
            return false;
        }
    }
    if let Some(range) = &filters.date_range {
        if range.is_complete() {
            let within = (|| {
                let start = NaiveDate::parse_from_str(&range.start, "%Y-%m-%d").ok()?;
                let end = NaiveDate::parse_from_str(&range.end, "%Y-%m-%d").ok()?;
                let uploaded = parse_upload_time(&file.upload_time)?;
                let start = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0)?);
                // End of day, inclusive.
                let end = Utc.from_utc_datetime(&end.and_hms_milli_opt(23, 59, 59, 999)?);
                Some(uploaded >= start && uploaded <= end)
            })()
            .unwrap_or(false);
            if !within {
                return false;
            }
        }
    }
    true
}
