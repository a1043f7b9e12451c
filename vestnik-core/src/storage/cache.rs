// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named response-cache storage operations.
//!
//! A "cache" is the set of rows sharing a `cache_name`. There is no
//! entry-level expiry; the only eviction is dropping a whole named cache,
//! which the worker does on activation for names it no longer owns.

use rusqlite::params;

use super::error::CachedResponse;
use super::{Storage, StorageError};

impl Storage {
    // === Response Cache Operations ===

    /// Stores a response in the named cache, replacing any previous entry
    /// for the same URL.
    pub fn cache_put(
        &self,
        cache_name: &str,
        entry: &CachedResponse,
    ) -> Result<(), StorageError> {
        self.conn().execute(
            "INSERT OR REPLACE INTO cache_entries
             (cache_name, url, status, content_type, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                cache_name,
                entry.url,
                entry.status as i64,
                entry.content_type,
                entry.body,
                entry.fetched_at as i64,
            ],
        )?;

        Ok(())
    }

    /// Looks up the cached response for a URL in the named cache.
    pub fn cache_match(
        &self,
        cache_name: &str,
        url: &str,
    ) -> Result<Option<CachedResponse>, StorageError> {
        let result = self.conn().query_row(
            "SELECT url, status, content_type, body, fetched_at
             FROM cache_entries WHERE cache_name = ?1 AND url = ?2",
            params![cache_name, url],
            |row| {
                Ok(CachedResponse {
                    url: row.get(0)?,
                    status: row.get::<_, i64>(1)? as u16,
                    content_type: row.get(2)?,
                    body: row.get(3)?,
                    fetched_at: row.get::<_, i64>(4)? as u64,
                })
            },
        );

        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Returns the distinct cache names currently present.
    pub fn cache_names(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT DISTINCT cache_name FROM cache_entries ORDER BY cache_name")?;

        let rows = stmt.query_map([], |row| row.get(0))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::Database)
    }

    /// Deletes an entire named cache.
    ///
    /// Returns the number of entries removed.
    pub fn delete_cache(&self, cache_name: &str) -> Result<usize, StorageError> {
        let rows_affected = self.conn().execute(
            "DELETE FROM cache_entries WHERE cache_name = ?1",
            params![cache_name],
        )?;
        Ok(rows_affected)
    }

    /// Counts entries in the named cache.
    pub fn cache_count(&self, cache_name: &str) -> Result<usize, StorageError> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE cache_name = ?1",
            params![cache_name],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
