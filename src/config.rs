//! Runtime settings for the backend gateway
//!
//! Defaults target a local backend; every field can be overridden through
//! `MEMBRIDGE_*` environment variables (e.g. `MEMBRIDGE_BACKEND_URL`).

use crate::error::Result;
use serde::Deserialize;

/// Default base URL of the shared-memory HTTP backend
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default timeout for a single backend round trip, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway settings, injected into [`crate::backend::BackendClient`] at
/// construction so tests can point the gateway at a mock backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the memory backend (no trailing slash)
    pub backend_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Load settings from defaults overlaid with `MEMBRIDGE_*` env vars
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(config::Environment::with_prefix("MEMBRIDGE"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Settings pointing at an explicit base URL (used by tests)
    pub fn with_backend_url(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
