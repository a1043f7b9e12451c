//! Network + Transport Layer
//!
//! Provides the HTTP transport seam the offline worker delivers through.
//!
//! # Architecture
//!
//! - **HttpTransport trait**: platform-agnostic interface for HTTP I/O
//! - **Request/response types**: the minimal wire surface the worker routes on
//! - **MockTransport**: scriptable in-memory transport for tests
//! - **ReqwestTransport**: blocking HTTP client (feature `network`)
//!
//! An `Err` from a transport always means no response was received;
//! HTTP error statuses come back as `Ok` responses. The worker's
//! queue-on-failure behavior hinges on that distinction.

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod message;
#[cfg(not(feature = "testing"))]
mod message;

#[cfg(feature = "testing")]
pub mod mock;
#[cfg(not(feature = "testing"))]
mod mock;

#[cfg(feature = "testing")]
pub mod transport;
#[cfg(not(feature = "testing"))]
mod transport;

#[cfg(feature = "network")]
mod http;

// Error types
pub use error::NetworkError;

// Request/response types
pub use message::{HttpRequest, HttpResponse, Method};

// Transport abstraction
pub use transport::{HttpTransport, TransportResult};

// Mock transport for testing
pub use mock::MockTransport;

// Blocking HTTP transport for production
#[cfg(feature = "network")]
pub use http::{HttpClientConfig, ReqwestTransport};
