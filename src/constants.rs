//! # Application Constants
//!
//! This module defines constants used throughout the client. Centralizing
//! them improves maintainability and reduces the risk of inconsistencies
//! across the codebase.

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "FILESTORE_API_URL";

/// Default API base URL when none is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Status assigned to files whose metadata carries none
pub const DEFAULT_FILE_STATUS: &str = "In progress";

/// JSON content type attached to request bodies by default
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Authorization scheme for authenticated requests
pub const BEARER_SCHEME: &str = "Bearer";

/// Filter chip id prefix for uploader filters
pub const UPLOADER_FILTER_PREFIX: &str = "uploader-";

/// Filter chip id prefix for status filters
pub const STATUS_FILTER_PREFIX: &str = "status-";

/// Filter chip id prefix for date-range filters
pub const DATE_FILTER_PREFIX: &str = "date-";

/// Permission granting read access to a collection
pub const PERMISSION_READ: &str = "read";

/// Permission granting write access to a collection
pub const PERMISSION_WRITE: &str = "write";

/// Permission granting delete access to a collection
pub const PERMISSION_DELETE: &str = "delete";
