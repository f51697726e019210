//! Application configuration.
//!
//! A plain value object, built once at process start and passed by
//! reference. Nothing here re-reads the environment after construction.

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "RIPPLE_API_URL";

/// Read-only application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    api_url: String,
}

impl AppConfig {
    /// Build a configuration with an explicit API URL. Intended for tests
    /// and for callers that wire configuration themselves.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// Reads [`API_URL_ENV`] once. A missing or non-UTF-8 value resolves
    /// to an empty string rather than an error.
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_ENV).unwrap_or_default();
        tracing::debug!(api_url = %api_url, "configuration loaded from environment");
        Self { api_url }
    }

    /// The configured API base URL. Empty when unconfigured.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
