//! # Error Taxonomy
//!
//! This module defines the closed set of error kinds used across the client.
//! The taxonomy separates three layers:
//!
//! - [`ApiError`]: typed HTTP/transport outcomes produced by the request
//!   executor. This is the single place raw status codes are classified.
//! - [`ApplicationError`]: an operation-scoped error carrying a user-facing
//!   message and a remediation hint, produced by the service layer.
//! - [`ServiceError`]: the plain record handed to the UI for display when a
//!   failure is aggregated rather than propagated.
//!
//! ## Status Mapping
//!
//! | Kind         | Status        |
//! |--------------|---------------|
//! | Unauthorized | 401           |
//! | Forbidden    | 403           |
//! | NotFound     | 404           |
//! | Validation   | 422           |
//! | Server       | >= 500        |
//! | Http         | other non-2xx |
//! | Network      | none (0)      |

use http::StatusCode;
use thiserror::Error;

/// Result alias for operations that surface typed HTTP errors.
pub type AppResult<T> = Result<T, ApiError>;

/// Result alias for service operations that surface user-facing errors.
pub type ServiceResult<T> = Result<T, ApplicationError>;

/// Typed error produced by the request executor.
///
/// Exactly one variant exists per taxonomy kind. Transport failures
/// (`Network`) are never conflated with HTTP-level failures: a `Network`
/// error means no response was obtained at all.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP 403.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// HTTP 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 422, optionally with structured per-field details.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// HTTP 5xx.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status.
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Transport failure before any response was obtained
    /// (connection refused, DNS failure, body read error).
    #[error("Network request failed: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ApiError {
    /// Classifies a non-success HTTP status into the taxonomy.
    ///
    /// This is the single source of truth for the status -> kind mapping;
    /// the executor calls it for every non-2xx response.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation {
                message,
                details: None,
            },
            code if code >= 500 => Self::Server {
                status: code,
                message,
            },
            code => Self::Http {
                status: code,
                message,
            },
        }
    }

    /// Wraps a transport-level failure.
    pub fn network<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Numeric HTTP status associated with this error, 0 for `Network`.
    pub fn status(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation { .. } => 422,
            Self::Server { status, .. } | Self::Http { status, .. } => *status,
            Self::Network { .. } => 0,
        }
    }

    /// The human-readable message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized(m) | Self::Forbidden(m) | Self::NotFound(m) => m,
            Self::Validation { message, .. }
            | Self::Server { message, .. }
            | Self::Http { message, .. }
            | Self::Network { message, .. } => message,
        }
    }
}

/// Fixed set of remediation hints shown to users alongside failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    TryAgain,
    ContactSupport,
    TryAgainOrContactSupport,
    VerifyExists,
    RequestAccess,
    CheckInput,
    RefreshPage,
}

impl ErrorAction {
    /// The user-facing hint text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TryAgain => "Please try again later",
            Self::ContactSupport => "Please contact support if this problem persists",
            Self::TryAgainOrContactSupport => {
                "Please try again later or contact support if the problem persists"
            }
            Self::VerifyExists => "Please verify the resource exists",
            Self::RequestAccess => "Contact an administrator to request access",
            Self::CheckInput => "Please verify your input and try again",
            Self::RefreshPage => "Please refresh the page and try again",
        }
    }
}

impl std::fmt::Display for ErrorAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation-scoped error with a user-facing message and remediation hint.
///
/// Produced by the service layer when mapping an [`ApiError`] to something
/// meaningful for the user ("Collection \"x\" not found" rather than a bare
/// 404). The original cause is preserved for diagnostics.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApplicationError {
    pub message: String,
    pub action: ErrorAction,
    #[source]
    pub source: Option<ApiError>,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>, action: ErrorAction, source: Option<ApiError>) -> Self {
        Self {
            message: message.into(),
            action,
            source,
        }
    }
}

/// Plain error record aggregated for UI display.
///
/// Unlike [`ApplicationError`] this is a value, not an error type: once a
/// failure has been caught at an aggregation boundary it is reported, never
/// re-thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub message: String,
    pub action: ErrorAction,
}

impl From<&ApplicationError> for ServiceError {
    fn from(err: &ApplicationError) -> Self {
        Self {
            message: err.message.clone(),
            action: err.action,
        }
    }
}

/// Message template: `<resource> not found`.
pub(crate) fn not_found_message(resource: &str) -> String {
    format!("{resource} not found")
}

/// Message template: `Access to <resource> is forbidden`.
pub(crate) fn forbidden_message(resource: &str) -> String {
    format!("Access to {resource} is forbidden")
}

/// Message template: `Failed to fetch <resource>[: <details>]`.
pub(crate) fn fetch_failed_message(resource: &str, details: Option<&str>) -> String {
    match details {
        Some(details) => format!("Failed to fetch {resource}: {details}"),
        None => format!("Failed to fetch {resource}"),
    }
}

/// Message template: `<operation> failed[: <details>]`.
pub(crate) fn operation_failed_message(operation: &str, details: Option<&str>) -> String {
    match details {
        Some(details) => format!("{operation} failed: {details}"),
        None => format!("{operation} failed"),
    }
}

/// Message template: `Validation failed for <operation>`.
pub(crate) fn validation_failed_message(operation: &str) -> String {
    format!("Validation failed for {operation}")
}
