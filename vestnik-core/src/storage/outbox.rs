// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outbox queue storage operations.

use rusqlite::params;

use super::error::OutboxEntry;
use super::{unix_now, Storage, StorageError};

impl Storage {
    // === Outbox Operations ===

    /// Appends a pending write to the outbox.
    ///
    /// Returns the monotonic key assigned by the store. The enqueue
    /// timestamp is recorded here, not supplied by the caller.
    pub fn outbox_enqueue(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<i64, StorageError> {
        let body_json = serde_json::to_string(body)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.conn().execute(
            "INSERT INTO outbox (url, body, enqueued_at) VALUES (?1, ?2, ?3)",
            params![url, body_json, unix_now() as i64],
        )?;

        Ok(self.conn().last_insert_rowid())
    }

    /// Returns all outbox entries in insertion order.
    pub fn outbox_entries(&self) -> Result<Vec<OutboxEntry>, StorageError> {
        let mut stmt = self.conn().prepare(
            "SELECT id, url, body, enqueued_at FROM outbox ORDER BY id",
        )?;

        let rows = stmt.query_map([], row_to_outbox_entry)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::Database)
    }

    /// Deletes a single outbox entry by its assigned key.
    ///
    /// Idempotent: removing an absent id returns `Ok(false)`.
    pub fn outbox_remove(&self, id: i64) -> Result<bool, StorageError> {
        let rows_affected = self
            .conn()
            .execute("DELETE FROM outbox WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    /// Counts queued outbox entries.
    pub fn outbox_count(&self) -> Result<usize, StorageError> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM outbox", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Converts a database row to an OutboxEntry.
fn row_to_outbox_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<OutboxEntry> {
    let body_json: String = row.get(2)?;
    // A body that fails to parse was corrupted after the fact; surface it
    // as an empty object rather than poisoning the whole listing.
    let body = serde_json::from_str(&body_json)
        .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));

    Ok(OutboxEntry {
        id: row.get(0)?,
        url: row.get(1)?,
        body,
        enqueued_at: row.get::<_, i64>(3)? as u64,
    })
}
