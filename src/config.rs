//! # Configuration Management
//!
//! This module provides configuration for the client. Configuration is
//! resolved from the process environment at construction time with sensible
//! defaults for local development.
//!
//! ## Configuration Sources
//!
//! 1. **Environment**: `FILESTORE_API_URL` when set
//! 2. **Defaults**: a local development URL otherwise
//!
//! ## Configuration Options
//!
//! - `api_base_url`: Base URL of the file-collections API, without a
//!   trailing slash. Endpoints are appended verbatim.

use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL};
use serde::{Deserialize, Serialize};

/// Client configuration.
///
/// Cheap to clone; shared across services via the [`crate::client::ApiClient`]
/// that owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, normalized to carry no trailing slash.
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at the given base URL.
    ///
    /// A trailing slash is stripped so endpoint paths starting with `/`
    /// concatenate cleanly.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let mut api_base_url = api_base_url.into();
        while api_base_url.ends_with('/') {
            api_base_url.pop();
        }
        Self { api_base_url }
    }

    /// Resolves configuration from the environment with fallback to defaults.
    ///
    /// Reads `FILESTORE_API_URL`; when unset or empty the default local
    /// development URL is used.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }
}
