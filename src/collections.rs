//! # Collections Service
//!
//! Assembles the collection tile grid from per-collection file listings.
//! There is no dedicated collections endpoint yet, so the file count for
//! each collection comes from its own listing fetch; the fetches fan out
//! concurrently and settle independently.
//!
//! ## Partial Failure
//!
//! This service is an error boundary: a failed sub-fetch never fails the
//! whole call. Every collection the user can see yields exactly one entry
//! (count zero on failure) and failures are reported as structured
//! [`ServiceError`] records for dismissible notices, so the grid always
//! renders even under partial backend degradation.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::client::{ApiClient, RequestOptions};
use crate::errors::{
    fetch_failed_message, forbidden_message, not_found_message, ApiError, ApplicationError,
    ErrorAction, ServiceError, ServiceResult,
};
use crate::models::{Collection, User};

/// Best-effort result of a collections fetch cycle.
///
/// `collections` always covers every collection name in the input,
/// in input order, regardless of how many sub-fetches failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionsResult {
    pub collections: Vec<Collection>,
    pub errors: Vec<ServiceError>,
}

/// Service for fetching the user's collections with file counts.
pub struct CollectionsService {
    api: Arc<ApiClient>,
}

impl CollectionsService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetches one [`Collection`] per collection the user can access.
    ///
    /// Issues all per-collection listing requests concurrently and joins on
    /// the whole batch. An empty collection set returns immediately without
    /// touching the network.
    pub async fn get_collections(&self, user: &User) -> CollectionsResult {
        let names: Vec<&String> = user.collections.keys().collect();
        if names.is_empty() {
            return CollectionsResult::default();
        }
        debug!(count = names.len(), "fetching collection file counts");

        let fetches = names.iter().map(|name| async move {
            match self.collection_file_count(name).await {
                Ok(file_count) => (
                    Collection {
                        id: name.to_string(),
                        name: name.to_string(),
                        file_count,
                    },
                    None,
                ),
                Err(err) => {
                    warn!(collection = %name, error = %err, "collection fetch failed");
                    (
                        Collection {
                            id: name.to_string(),
                            name: name.to_string(),
                            file_count: 0,
                        },
                        Some(ServiceError::from(&err)),
                    )
                }
            }
        });

        let mut result = CollectionsResult::default();
        for (collection, error) in join_all(fetches).await {
            result.collections.push(collection);
            if let Some(error) = error {
                result.errors.push(error);
            }
        }
        result
    }

    /// Number of files in one collection, via its listing endpoint.
    ///
    /// A response without a `files` array counts as zero.
    async fn collection_file_count(&self, name: &str) -> ServiceResult<usize> {
        let response = self
            .api
            .request(&format!("/api/files/{name}"), RequestOptions::default())
            .await
            .map_err(|err| match err {
                e @ ApiError::NotFound(_) => ApplicationError::new(
                    not_found_message(&format!("Collection \"{name}\"")),
                    ErrorAction::VerifyExists,
                    Some(e),
                ),
                e @ ApiError::Forbidden(_) => ApplicationError::new(
                    forbidden_message(&format!("collection \"{name}\"")),
                    ErrorAction::RequestAccess,
                    Some(e),
                ),
                e => {
                    let details = e.to_string();
                    ApplicationError::new(
                        fetch_failed_message(&format!("file count for \"{name}\""), Some(&details)),
                        ErrorAction::TryAgainOrContactSupport,
                        Some(e),
                    )
                }
            })?;

        Ok(response
            .as_json()
            .and_then(|body| body.get("files"))
            .and_then(|files| files.as_array())
            .map(|files| files.len())
            .unwrap_or(0))
    }
}
