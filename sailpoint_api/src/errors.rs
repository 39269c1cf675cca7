//! Error types for the API client.

use std::time::Duration;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A required configuration value was not supplied.
    #[error("Missing configuration value {0}")]
    MissingConfiguration(&'static str),
    /// The API returned HTTP 429. `retry_after` mirrors the `Retry-After` header.
    #[error("Rate limited by API (HTTP 429)")]
    RateLimited { retry_after: Option<Duration> },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Deserialize(String),
}
