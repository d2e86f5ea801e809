//! Fetch error types.
//!
//! Every variant collapses to a `false` outcome at the fetcher boundary. The
//! distinction only exists for the diagnostic log line.

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::Endpoint;

/// Errors that can occur while refreshing one chart.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint being fetched.
        endpoint: Endpoint,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint being fetched.
        endpoint: Endpoint,
        /// Status the server answered with.
        status: StatusCode,
    },

    /// The body was not a JSON array of the expected records.
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        /// Endpoint being fetched.
        endpoint: Endpoint,
        /// Underlying decode error.
        source: serde_json::Error,
    },
}
