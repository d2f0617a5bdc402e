use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::DEFAULT_FILE_STATUS;
use crate::errors::ServiceError;

/// Arbitrary metadata attached to a file at upload time.
///
/// `status` is the only field the client interprets; everything else rides
/// along untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One stored file as reported by the listing endpoint.
///
/// `object_name` is unique within its collection and serves as the identity
/// key for selection and sorting.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FileRecord {
    pub object_name: String,
    pub collection: String,
    #[serde(default)]
    pub owner: String,
    pub original_filename: String,
    /// ISO-8601 timestamp; kept as a string because the backend may emit
    /// values the client must carry through even when unparseable.
    pub upload_time: String,
    pub content_type: String,
    pub size: u64,
    #[serde(default)]
    pub metadata: FileMetadata,
}

impl FileRecord {
    /// The file's workflow status, defaulting when metadata carries none.
    pub fn status(&self) -> &str {
        self.metadata.status.as_deref().unwrap_or(DEFAULT_FILE_STATUS)
    }
}

/// Wire shape of `GET /api/files/{collection}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ListFilesResponse {
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// A named grouping of files with independent access permissions.
///
/// Constructed transiently per fetch cycle; `file_count` is best-effort and
/// zero when the underlying fetch failed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub file_count: usize,
}

/// The signed-in user as seen by this client.
///
/// Maps collection name to the permission list granted on it. The aggregator
/// consumes the key set; capability derivation consumes the permission lists
/// together with `username`. A `BTreeMap` fixes iteration order so output
/// ordering is deterministic.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<String>>,
}

/// One page of a client-side paginated listing.
#[derive(Clone, Debug, PartialEq)]
pub struct FileListPage {
    pub files: Vec<FileRecord>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// Best-effort cross-collection recent-files result.
#[derive(Clone, Debug, PartialEq)]
pub struct RecentFiles {
    pub files: Vec<FileRecord>,
    pub errors: Vec<ServiceError>,
}
