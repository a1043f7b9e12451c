//! Transport Trait
//!
//! Platform-agnostic abstraction for HTTP delivery.

use super::error::NetworkError;
use super::message::{HttpRequest, HttpResponse};

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, NetworkError>;

/// Transport trait for HTTP delivery.
///
/// This trait abstracts the underlying HTTP mechanism, allowing for
/// platform-specific implementations and easy testing with mocks.
///
/// # Synchronous Interface
///
/// This trait uses a synchronous method for simplicity in the core
/// library. Platform implementations may internally use async runtimes
/// but expose a blocking interface here.
///
/// # Error contract
///
/// `Err` means the request produced *no response* (transient connectivity
/// failure). Responses with error statuses are returned as `Ok` and left
/// to the caller; the worker treats the two very differently.
pub trait HttpTransport: Send + Sync {
    /// Executes the request and waits for the response.
    fn execute(&self, request: &HttpRequest) -> TransportResult<HttpResponse>;
}
