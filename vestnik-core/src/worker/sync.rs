// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Background sync: scheduling and the outbox flush engine.
//!
//! Scheduling is delegated to the host; timing is opportunistic and not
//! guaranteed to be prompt. The flush itself drains a snapshot of the
//! outbox with at most one delivery attempt per entry per pass.

use std::sync::atomic::Ordering;
use std::sync::Mutex;

use log::{debug, warn};
use thiserror::Error;

use super::events::ClientMessage;
use super::worker::{OfflineWorker, WorkerError};
use crate::network::{HttpRequest, HttpTransport};

/// Sync scheduling error.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The host has no background-sync facility, or registration failed.
    #[error("Sync registration unavailable: {0}")]
    Unavailable(String),
}

/// Host facility for deferred flush triggers.
///
/// `schedule_flush` asks the host to invoke a flush at the next moment
/// connectivity is judged likely: immediately, on reconnect, or on a
/// periodic retry. The worker never depends on promptness.
pub trait SyncScheduler: Send + Sync {
    fn schedule_flush(&self) -> Result<(), SyncError>;
}

/// Scheduler for hosts without a background-sync facility.
///
/// Accepts every request and does nothing; the application is expected to
/// drive flushes itself (e.g. on its own reconnect events).
#[derive(Default)]
pub struct NullScheduler;

impl SyncScheduler for NullScheduler {
    fn schedule_flush(&self) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Recording scheduler for tests.
#[derive(Default)]
pub struct MockScheduler {
    requests: Mutex<usize>,
    fail: Mutex<bool>,
}

impl MockScheduler {
    pub fn new() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::default())
    }

    /// Number of schedule requests received.
    pub fn request_count(&self) -> usize {
        *self.requests.lock().unwrap()
    }

    /// Makes subsequent schedule requests fail.
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl SyncScheduler for MockScheduler {
    fn schedule_flush(&self) -> Result<(), SyncError> {
        *self.requests.lock().unwrap() += 1;
        if *self.fail.lock().unwrap() {
            return Err(SyncError::Unavailable("mock scheduler failing".into()));
        }
        Ok(())
    }
}

/// Outcome of one flush invocation (all coalesced passes included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Entries for which a delivery attempt was made.
    pub attempted: usize,
    /// Entries acknowledged by the server and removed.
    pub delivered: usize,
    /// Entries left queued for the next flush.
    pub failed: usize,
}

impl<T: HttpTransport> OfflineWorker<T> {
    /// Drains the outbox.
    ///
    /// Reads a snapshot of the queue, then attempts each entry once in
    /// insertion order. A server-acknowledged success removes the entry
    /// and broadcasts [`ClientMessage::MessageSent`]; any failure leaves
    /// the entry in place and moves on. Entries enqueued while a pass is
    /// running are not part of its snapshot.
    ///
    /// Invocations are single-flight: a flush arriving while another is
    /// draining coalesces into one follow-up pass instead of running
    /// concurrently, so an entry is never delivered twice.
    pub fn flush(&self) -> Result<FlushReport, WorkerError> {
        if self.flush_active.swap(true, Ordering::SeqCst) {
            self.flush_rerun.store(true, Ordering::SeqCst);
            return Ok(FlushReport::default());
        }

        let mut report = self.flush_pass();
        while self.flush_rerun.swap(false, Ordering::SeqCst) {
            let follow_up = self.flush_pass();
            report.attempted += follow_up.attempted;
            report.delivered += follow_up.delivered;
            report.failed += follow_up.failed;
        }
        self.flush_active.store(false, Ordering::SeqCst);

        Ok(report)
    }

    /// One snapshot-and-drain pass.
    fn flush_pass(&self) -> FlushReport {
        let entries = match self.storage().outbox_entries() {
            Ok(entries) => entries,
            Err(e) => {
                // Degraded storage: skip this pass rather than fail the
                // sync event.
                warn!("outbox snapshot failed: {}", e);
                return FlushReport::default();
            }
        };

        let mut report = FlushReport::default();

        for entry in entries {
            report.attempted += 1;
            let request = HttpRequest::post_json(&entry.url, &entry.body);

            match self.transport().execute(&request) {
                Ok(response) if response.is_success() => {
                    if let Err(e) = self.storage().outbox_remove(entry.id) {
                        warn!("failed to remove delivered entry {}: {}", entry.id, e);
                    }
                    self.clients().broadcast(&ClientMessage::MessageSent { item: entry });
                    report.delivered += 1;
                }
                Ok(response) => {
                    debug!(
                        "replay of {} rejected with HTTP {}, keeping entry {}",
                        entry.url, response.status, entry.id
                    );
                    report.failed += 1;
                }
                Err(e) => {
                    debug!("replay of {} failed: {}, keeping entry {}", entry.url, e, entry.id);
                    report.failed += 1;
                }
            }
        }

        report
    }
}
