//! Typed fetch errors shared by the TMDB and YouTube clients.

use thiserror::Error;

/// Result alias for remote fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of a single remote fetch.
///
/// Screens only branch on success or failure; the variants exist so the
/// cause ends up in the logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL or request itself could not be built.
    #[error("failed to build request for {path}: {reason}")]
    Request {
        /// Endpoint path relative to the base URL.
        path: String,
        /// Human readable cause.
        reason: String,
    },

    /// Connectivity failure, or the body could not be read.
    #[error("request failed: {path}")]
    Transport {
        /// Endpoint path relative to the base URL.
        path: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("API error (HTTP {status}) for {path}: {message}")]
    Status {
        /// Endpoint path relative to the base URL.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, or the raw body.
        message: String,
    },

    /// The payload did not match the expected shape.
    #[error("failed to decode JSON response: {path}")]
    Decode {
        /// Endpoint path relative to the base URL.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The search returned no usable item.
    #[error("no result found for query: {query}")]
    NotFound {
        /// The query that produced no result.
        query: String,
    },
}

impl FetchError {
    /// Returns `true` for [`FetchError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
