// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! Durable substrate for the offline worker: the outbox queue of pending
//! outbound writes and the named response caches. Uses SQLite; every
//! operation is a single-statement append, lookup, or delete, which is
//! what lets the layers above get away without explicit locking.

#[cfg(feature = "testing")]
pub mod cache;
#[cfg(not(feature = "testing"))]
mod cache;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

#[cfg(feature = "testing")]
pub mod outbox;
#[cfg(not(feature = "testing"))]
mod outbox;

pub mod migration;

pub use error::{CachedResponse, OutboxEntry, StorageError};

use rusqlite::Connection;
use std::path::Path;

/// SQLite-based storage implementation.
///
/// One database file holds both the outbox table and the response-cache
/// table, so a single `Storage` handle serves the whole worker.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens or creates a storage database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Creates an in-memory storage (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&self.conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Current Unix time in seconds; clamps to 0 on a pre-epoch clock.
pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
