//! # Filestore Client
//!
//! An async client library for a file-collections storage service. It wraps
//! the service's REST API in typed Rust services and carries the pieces of
//! browsing state (selection, filters, sorting, confirm dialogs) that sit on
//! top of the API data.
//!
//! ## Architecture
//!
//! The crate follows a layered architecture with clear separation of concerns:
//! - **Transport**: Pluggable HTTP layer behind the [`HttpTransport`] trait,
//!   with a default `reqwest` implementation
//! - **Client**: The single request executor handling auth headers, body
//!   encoding, and the error taxonomy
//! - **Services**: Collections and files operations built on the client,
//!   including the partial-failure-tolerant collections aggregator
//! - **State**: Selection, filter, sort, and dialog state machines that are
//!   pure data and independently testable
//! - **Models**: Data structures shared across the layers
//!
//! ## Core Features
//!
//! - Typed error taxonomy mapping HTTP status codes to user-facing hints
//! - Concurrent per-collection fan-out that reports partial failures
//!   alongside partial results
//! - Client-side filtering, sorting, and pagination of file listings
//! - Controlled and uncontrolled table selection
//! - Draft-then-apply filter editing with removable filter chips
//! - Per-file capability derivation from collection permissions and
//!   ownership
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use filestore_client::{ApiClient, ClientConfig, CollectionsService};
//!
//! # async fn run(user: filestore_client::User) {
//! let client = Arc::new(ApiClient::with_default_transport(ClientConfig::from_env()));
//! let collections = CollectionsService::new(client);
//! let result = collections.get_collections(&user).await;
//! for error in &result.errors {
//!     eprintln!("{}: {}", error.message, error.action.as_str());
//! }
//! # }
//! ```

mod actions;
mod client;
mod collections;
mod config;
mod constants;
mod errors;
mod files;
mod filters;
mod models;
mod permissions;
mod selection;
mod sorting;
mod transport;
mod utils;

#[cfg(test)]
mod testing;

pub use actions::{ConfirmDialog, FileActionDialogs};
pub use client::{ApiClient, ApiResponse, AuthContext, RequestOptions};
pub use collections::{CollectionsResult, CollectionsService};
pub use config::ClientConfig;
pub use errors::{
    ApiError, AppResult, ApplicationError, ErrorAction, ServiceError, ServiceResult,
};
pub use files::FilesService;
pub use filters::{
    available_uploaders, ActiveFilter, CollectionFilters, DateRange, FilterDraft, FilterKind,
    FilterValues,
};
pub use models::{
    Collection, FileListPage, FileMetadata, FileRecord, ListFilesResponse, RecentFiles, User,
};
pub use permissions::{file_permissions, FilePermissions};
pub use selection::TableSelection;
pub use sorting::{FileSorter, SortDirection, SortField};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, MultipartForm, MultipartPart, RequestBody,
    ReqwestTransport, TransportError,
};
pub use utils::{format_date_short, normalize_upload_time, parse_upload_time};
