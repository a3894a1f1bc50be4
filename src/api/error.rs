//! Error types for registry operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level without
/// dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// Error type for fetching the machine list.
///
/// Every variant abandons the current cycle; none of them is fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("failed to GET {url}: {source}")]
    Http {
        /// The request URL
        url: url::Url,
        /// Underlying transport error
        #[source]
        source: HttpError,
    },

    /// The server answered with a non-success status.
    ///
    /// The body is kept verbatim to aid diagnosis.
    #[error("failed to GET {url} with status {status}: {body}")]
    Status {
        /// The request URL
        url: url::Url,
        /// The response status
        status: http::StatusCode,
        /// The response body, lossily decoded as UTF-8
        body: String,
    },

    /// The response body is not a valid machine list.
    #[error("failed to parse response body as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The machine endpoint URL could not be built from the server URL.
    #[error("invalid machine endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key cannot be sent in an `Authorization` header.
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[source] http::header::InvalidHeaderValue),
}
