// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! The offline worker orchestrator.
//!
//! Intercepts every application fetch and routes it through a policy:
//! network-first for documents, stale-while-revalidate for cacheable API
//! reads, send-or-queue for writes, verbatim pass-through for the rest.
//! Lifecycle events (install/activate), background sync, and push
//! notifications all land here too.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use super::events::ClientHub;
use super::notifications::{Notification, NotificationHost, PushPayload};
use super::router::{self, FetchPolicy};
use super::sync::{FlushReport, SyncScheduler};
use crate::config::WorkerConfig;
use crate::model::SendOutcome;
use crate::network::{HttpRequest, HttpResponse, HttpTransport, NetworkError};
use crate::storage::{CachedResponse, Storage, StorageError};

/// Worker error types.
///
/// Background side-effects never surface here; only the synchronous
/// critical path (no network, no cache, no fallback) produces an error.
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("No network and no cached fallback for {url}")]
    Unavailable { url: String },
}

/// The offline worker.
///
/// Owns the durable storage (outbox + caches) and delivers through a
/// pluggable transport. Host concerns — background-sync registration,
/// client messaging, notification display — come in as trait objects.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vestnik_core::{
///     MemoryClientHub, MemoryNotificationHost, MockTransport, NullScheduler,
///     OfflineWorker, Storage, WorkerConfig,
/// };
///
/// let worker = OfflineWorker::new(
///     WorkerConfig::default(),
///     Storage::in_memory().unwrap(),
///     MockTransport::new(),
///     Arc::new(NullScheduler),
///     MemoryClientHub::new(),
///     MemoryNotificationHost::new(),
/// );
/// worker.install();
/// worker.activate().unwrap();
/// ```
pub struct OfflineWorker<T: HttpTransport> {
    config: WorkerConfig,
    storage: Storage,
    transport: T,
    scheduler: Arc<dyn SyncScheduler>,
    clients: Arc<dyn ClientHub>,
    notifications: Arc<dyn NotificationHost>,
    pub(super) flush_active: AtomicBool,
    pub(super) flush_rerun: AtomicBool,
}

impl<T: HttpTransport> OfflineWorker<T> {
    /// Creates a worker.
    pub fn new(
        config: WorkerConfig,
        storage: Storage,
        transport: T,
        scheduler: Arc<dyn SyncScheduler>,
        clients: Arc<dyn ClientHub>,
        notifications: Arc<dyn NotificationHost>,
    ) -> Self {
        OfflineWorker {
            config,
            storage,
            transport,
            scheduler,
            clients,
            notifications,
            flush_active: AtomicBool::new(false),
            flush_rerun: AtomicBool::new(false),
        }
    }

    /// Seeds the static cache with the configured assets.
    ///
    /// Seeding is best-effort: an asset that fails to fetch is skipped,
    /// not fatal. A first visit on a flaky connection still installs.
    pub fn install(&self) {
        for asset in &self.config.static_assets {
            match self.transport.execute(&HttpRequest::get(asset.clone())) {
                Ok(response) if response.is_success() => {
                    self.store_cached(&self.config.static_cache, asset, &response);
                }
                Ok(response) => {
                    debug!("install skipped {}: HTTP {}", asset, response.status);
                }
                Err(e) => {
                    debug!("install skipped {}: {}", asset, e);
                }
            }
        }
        info!(
            "installed; static cache '{}' seeded",
            self.config.static_cache
        );
    }

    /// Purges every cache whose name is not one of the two current cache
    /// names, then claims live clients. This is the sole cache eviction
    /// mechanism; entries themselves never expire.
    pub fn activate(&self) -> Result<(), WorkerError> {
        for name in self.storage.cache_names()? {
            if name != self.config.static_cache && name != self.config.api_cache {
                let removed = self.storage.delete_cache(&name)?;
                info!("activate purged stale cache '{}' ({} entries)", name, removed);
            }
        }
        self.clients.claim();
        Ok(())
    }

    /// Intercepts one fetch.
    pub fn handle_fetch(&self, request: &HttpRequest) -> Result<HttpResponse, WorkerError> {
        match router::classify(&self.config, request) {
            FetchPolicy::Document => self.fetch_document(request),
            FetchPolicy::CachedApiRead => self.fetch_cached_api(request),
            FetchPolicy::QueuedWrite => self.fetch_queued_write(request),
            FetchPolicy::PassThrough => Ok(self.transport.execute(request)?),
        }
    }

    /// Invokes a flush when the host fires the configured sync tag.
    pub fn handle_sync(&self, tag: &str) -> Result<FlushReport, WorkerError> {
        if tag == self.config.sync_tag {
            self.flush()
        } else {
            debug!("ignoring sync event with unknown tag '{}'", tag);
            Ok(FlushReport::default())
        }
    }

    /// Surfaces a push event as a user notification.
    ///
    /// The payload is parsed best-effort; malformed or absent data falls
    /// back to the configured defaults rather than being dropped.
    pub fn handle_push(&self, data: Option<&[u8]>) {
        let payload = PushPayload::parse(data);
        let notification = Notification::from_push(&self.config, &payload);
        self.notifications.show(&notification);
    }

    /// Routes a notification tap back into the application.
    ///
    /// Dismissal of the tapped notification is the host's side of the
    /// contract; the worker only decides where the tap goes.
    pub fn handle_notification_click(&self, notification: &Notification) {
        self.notifications.open_window(&notification.url);
    }

    // === Fetch policies ===

    /// Network-first with cached-document fallback.
    fn fetch_document(&self, request: &HttpRequest) -> Result<HttpResponse, WorkerError> {
        let path = self.same_origin_path(request);

        match self.transport.execute(request) {
            Ok(response) => {
                if response.is_success() {
                    self.store_cached(&self.config.static_cache, path, &response);
                }
                Ok(response)
            }
            Err(e) => {
                debug!("navigation fetch for {} failed: {}", path, e);
                match self
                    .storage
                    .cache_match(&self.config.static_cache, &self.config.fallback_document)
                {
                    Ok(Some(cached)) => Ok(cached_to_response(&cached)),
                    Ok(None) => Err(WorkerError::Unavailable {
                        url: request.url.clone(),
                    }),
                    Err(storage_err) => {
                        warn!("fallback lookup failed: {}", storage_err);
                        Err(WorkerError::Unavailable {
                            url: request.url.clone(),
                        })
                    }
                }
            }
        }
    }

    /// Stale-while-revalidate. Never a hard failure.
    fn fetch_cached_api(&self, request: &HttpRequest) -> Result<HttpResponse, WorkerError> {
        let path = self.same_origin_path(request);

        let cached = self
            .storage
            .cache_match(&self.config.api_cache, path)
            .unwrap_or_else(|e| {
                warn!("cache lookup for {} failed: {}", path, e);
                None
            });

        // Revalidate even when answering from cache; a success replaces
        // the entry for next time.
        let fresh = match self.transport.execute(request) {
            Ok(response) => {
                if response.is_success() {
                    self.store_cached(&self.config.api_cache, path, &response);
                }
                Some(response)
            }
            Err(e) => {
                debug!("revalidation of {} failed: {}", path, e);
                None
            }
        };

        if let Some(cached) = cached {
            return Ok(cached_to_response(&cached));
        }
        if let Some(fresh) = fresh {
            return Ok(fresh);
        }

        // Cold cache and no network: an empty payload of the right shape,
        // so list views render empty instead of erroring.
        let placeholder = if router::placeholder_is_list(path) {
            serde_json::Value::Array(Vec::new())
        } else {
            serde_json::Value::Object(Default::default())
        };
        Ok(HttpResponse::json(200, &placeholder))
    }

    /// Direct delivery, falling back to the outbox.
    fn fetch_queued_write(&self, request: &HttpRequest) -> Result<HttpResponse, WorkerError> {
        let path = self.same_origin_path(request);

        match self.transport.execute(request) {
            // Pass every received response through unmodified, including
            // application-level rejections.
            Ok(response) => Ok(response),
            Err(e) => {
                info!("write to {} failed ({}), queueing", path, e);

                let body = request.body_json_lenient();
                if let Err(storage_err) = self.storage.outbox_enqueue(path, &body) {
                    // Accepted degraded mode: the message may be lost, but
                    // the fetch path must not crash the user action.
                    warn!("outbox enqueue for {} failed: {}", path, storage_err);
                }

                if let Err(sync_err) = self.scheduler.schedule_flush() {
                    warn!("sync scheduling failed: {}", sync_err);
                }

                Ok(queued_response())
            }
        }
    }

    // === Accessors (used by the flush engine and tests) ===

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub(super) fn clients(&self) -> &Arc<dyn ClientHub> {
        &self.clients
    }

    // === Helpers ===

    /// Normalizes a classified same-origin request to its path. Routing
    /// guarantees the request is same-origin by the time this is called.
    fn same_origin_path<'a>(&self, request: &'a HttpRequest) -> &'a str {
        router::same_origin_path(&self.config, &request.url).unwrap_or(request.url.as_str())
    }

    fn store_cached(&self, cache: &str, url: &str, response: &HttpResponse) {
        let entry = CachedResponse {
            url: url.to_string(),
            status: response.status,
            content_type: response.content_type.clone(),
            body: response.body.clone(),
            fetched_at: crate::storage::unix_now(),
        };
        if let Err(e) = self.storage.cache_put(cache, &entry) {
            warn!("cache write for {} failed: {}", url, e);
        }
    }
}

/// The locally synthesized "accepted but queued" response. Distinct from
/// a server success so the UI can mark the message pending.
fn queued_response() -> HttpResponse {
    // Serializing SendOutcome cannot fail
    let body = serde_json::to_value(SendOutcome::queued()).unwrap_or_default();
    HttpResponse::json(200, &body)
}

fn cached_to_response(cached: &CachedResponse) -> HttpResponse {
    HttpResponse {
        status: cached.status,
        content_type: cached.content_type.clone(),
        body: cached.body.clone(),
    }
}
