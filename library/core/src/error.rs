//! Client Errors
//!
//! The only failure kind the library service surfaces is a failed round
//! trip: either the transport broke or the service answered non-2xx.
//! Callers show the message inline and may retry manually; the client
//! itself never retries.

use thiserror::Error;

/// A failed request against the library service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connect, timeout, malformed response body)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: reqwest::StatusCode,
        /// Response body, as diagnostic text
        body: String,
    },
}
