//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `JOBBOARD_*` environment variables or a configuration
//! file; every field falls back to a default suitable for a local backend.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_DIR: &str = ".jobboard";
const DEFAULT_PAGE_SIZE: usize = 6;

/// Configuration values for the job board client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct ClientSettings {
    /// Base URL of the job board REST API.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Directory holding the persisted session.
    pub session_dir: Option<String>,
    /// Rows per page for listings.
    pub page_size: Option<usize>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl ClientSettings {
    /// Parse the configured base URL, falling back to the local backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an absolute URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the session directory, falling back to the default.
    pub fn session_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.session_dir.as_deref().unwrap_or(DEFAULT_SESSION_DIR))
    }

    /// Return the listing page size, falling back to the default.
    pub fn page_size(&self) -> usize {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
