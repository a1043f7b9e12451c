//! Network error types.

use thiserror::Error;

/// Network error types.
///
/// An `Err` from the transport always means *no response was received*.
/// Application-level rejections (4xx/5xx) come back as `Ok` responses and
/// are handled by the caller.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// No connectivity: connection refused, DNS failure, timeout.
    #[error("Offline: {0}")]
    Offline(String),

    /// The request could not be built or sent for a non-connectivity reason.
    #[error("Request failed: {0}")]
    Request(String),

    /// The request target could not be interpreted.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
