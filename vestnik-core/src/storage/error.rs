//! Storage error and record types.

use thiserror::Error;

/// Storage error types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// A queued outbound write awaiting delivery.
///
/// Entries are append-only: they are created when a write fails due to
/// connectivity, and removed as a whole after the server acknowledges a
/// successful replay. They are never updated in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutboxEntry {
    /// Monotonic key assigned by the store (SQLite rowid).
    pub id: i64,
    /// Target path the write was addressed to, e.g. `/api/messages`.
    pub url: String,
    /// The JSON request body as captured at enqueue time.
    pub body: serde_json::Value,
    /// Unix timestamp (seconds) when the entry was queued.
    #[serde(rename = "ts")]
    pub enqueued_at: u64,
}

/// A cached HTTP response body, keyed by (cache name, url).
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    /// Full request URL (method is implicitly GET).
    pub url: String,
    /// HTTP status of the response that was cached.
    pub status: u16,
    /// Content-Type header value, if the response carried one.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Unix timestamp (seconds) of the last successful fetch.
    pub fetched_at: u64,
}
