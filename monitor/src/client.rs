//! Log-analytics API client.
//!
//! A thin wrapper around a shared [`reqwest::Client`]: one GET per endpoint,
//! a binary status check, and a JSON decode. No retries and no timeouts.

use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::FetchError;

/// Endpoints of the analytics API consumed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Per-minute log volume, `[{ ts, count }]`.
    LogsOverTime,
    /// Log volume per level, `[{ level, count }]`.
    LogLevels,
    /// Log volume per host, `[{ host, count }]`.
    TopHosts,
}

impl Endpoint {
    /// Every endpoint, in refresh order.
    pub const ALL: [Self; 3] = [Self::LogsOverTime, Self::LogLevels, Self::TopHosts];

    /// Path suffix appended to the base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::LogsOverTime => "/api/logs/over-time",
            Self::LogLevels => "/api/logs/levels",
            Self::TopHosts => "/api/logs/top-hosts",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// HTTP client bound to one analytics API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the API at `base_url`. A trailing slash is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full URL of an endpoint.
    ///
    /// ```
    /// use monitor::{ApiClient, Endpoint};
    ///
    /// let client = ApiClient::new("http://localhost:8000/");
    /// assert_eq!(
    ///     client.url(Endpoint::LogLevels),
    ///     "http://localhost:8000/api/logs/levels"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Fetches an endpoint and decodes its body as a JSON array of `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request cannot be sent or the body cannot be read
    /// - The server answers with a non-2xx status
    /// - The body is not a JSON array of `T`
    pub async fn get_records<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Vec<T>, FetchError> {
        let url = self.url(endpoint);
        tracing::trace!(%url, "Fetching endpoint");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}
