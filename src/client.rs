//! # Request Executor
//!
//! This module provides the HTTP request executor used by every service in
//! the client. It is the only place where raw transport and HTTP outcomes
//! are turned into the typed error taxonomy; everything above it consumes
//! [`ApiError`](crate::errors::ApiError) values only.
//!
//! ## Responsibilities
//!
//! - Attach `Authorization: Bearer <token>` when a session token is present
//! - Default `Content-Type: application/json`, except for multipart bodies,
//!   whose boundary the transport must set itself
//! - Drop headers whose value is absent before dispatch
//! - Parse JSON success bodies; hand back raw responses otherwise
//! - Classify non-2xx responses and wrap transport failures
//!
//! The executor does not cache, retry, or deduplicate. One client instance
//! carries one logical session.

use std::sync::{Arc, RwLock};

use http::Method;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::constants::{BEARER_SCHEME, CONTENT_TYPE_JSON};
use crate::errors::{ApiError, AppResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody, ReqwestTransport};

/// Session credentials obtained from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub access_token: String,
}

impl AuthContext {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// Per-request options: method, extra headers, body.
///
/// Header values are optional; entries carrying `None` are stripped before
/// dispatch rather than sent empty.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, Option<String>)>,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(method: Method, body: serde_json::Value) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    pub fn multipart(form: crate::transport::MultipartForm) -> Self {
        Self {
            method: Method::POST,
            headers: Vec::new(),
            body: RequestBody::Multipart(form),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.headers.push((name.into(), value));
        self
    }
}

/// Outcome of a successful request.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// The response declared a JSON content type and parsed cleanly.
    Json(serde_json::Value),
    /// Anything else, handed back for the caller to consume (e.g. download).
    Raw(HttpResponse),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<HttpResponse> {
        match self {
            Self::Json(_) => None,
            Self::Raw(response) => Some(response),
        }
    }
}

/// HTTP client for the file-collections API.
///
/// Holds the base URL, the transport, and the current session credential.
/// The credential is set once after sign-in and read on every request; a
/// client instance serves a single logical session.
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    auth: RwLock<Option<AuthContext>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            auth: RwLock::new(None),
        }
    }

    /// Constructs a client backed by the production `reqwest` transport.
    pub fn with_default_transport(config: ClientConfig) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()))
    }

    /// Installs session credentials; subsequent requests carry the token.
    pub fn set_auth(&self, auth: AuthContext) {
        *self.write_lock() = Some(auth);
    }

    /// Drops session credentials; subsequent requests are unauthenticated.
    pub fn clear_auth(&self) {
        *self.write_lock() = None;
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Option<AuthContext>> {
        match self.auth.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn token(&self) -> Option<String> {
        let guard = match self.auth.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().map(|auth| auth.access_token.clone())
    }

    /// Dispatches one request against the API.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path appended verbatim to the configured base URL
    /// * `options` - Method, extra headers, and body
    ///
    /// # Returns
    ///
    /// A parsed JSON body for JSON responses, the raw response otherwise.
    /// Non-2xx statuses and transport failures surface as typed
    /// [`ApiError`](crate::errors::ApiError) values.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> AppResult<ApiResponse> {
        let request_id = Uuid::new_v4();
        let url = format!("{}{}", self.config.api_base_url, endpoint);

        let mut headers: Vec<(String, String)> = Vec::new();
        if let Some(token) = self.token() {
            headers.push((
                "Authorization".to_string(),
                format!("{BEARER_SCHEME} {token}"),
            ));
        }

        let mut has_content_type = false;
        for (name, value) in options.headers {
            // Valueless headers are dropped rather than dispatched empty.
            let Some(value) = value else { continue };
            if name.eq_ignore_ascii_case("content-type") {
                has_content_type = true;
            }
            headers.push((name, value));
        }
        // Multipart bodies get no explicit content type so the transport can
        // set its own boundary.
        if !has_content_type && !options.body.is_multipart() {
            headers.push(("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()));
        }

        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        };
        debug!(%request_id, method = %request.method, endpoint, "dispatching request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(%request_id, error = %e, "transport failure");
            ApiError::network(e.message.clone(), e)
        })?;

        if !response.status.is_success() {
            let message = extract_error_message(&response);
            warn!(
                %request_id,
                status = response.status.as_u16(),
                "request failed"
            );
            let details = if response.status.as_u16() == 422 {
                response.json().ok().and_then(|b| b.get("details").cloned())
            } else {
                None
            };
            let mut err = ApiError::from_status(response.status, message);
            if let ApiError::Validation { details: slot, .. } = &mut err {
                *slot = details;
            }
            return Err(err);
        }

        if response.is_json() {
            let value = response
                .json()
                .map_err(|e| ApiError::network("failed to decode JSON response", e))?;
            Ok(ApiResponse::Json(value))
        } else {
            Ok(ApiResponse::Raw(response))
        }
    }
}

/// Best-effort extraction of a human message from an error response body.
///
/// Checks a JSON `message` field, then `detail`, falling back to a generic
/// status-coded string. Parse failures fall back silently.
fn extract_error_message(response: &HttpResponse) -> String {
    if response.is_json() {
        if let Ok(body) = response.json() {
            if let Some(message) = body
                .get("message")
                .and_then(|v| v.as_str())
                .or_else(|| body.get("detail").and_then(|v| v.as_str()))
            {
                return message.to_string();
            }
        }
    }
    format!("HTTP error! status: {}", response.status.as_u16())
}
