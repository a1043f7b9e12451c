//! Vestnik Core Library
//!
//! Offline-resilient message delivery core for the Vestnik messenger.
//! Intercepts application fetches, caches reads, queues writes durably
//! while offline, and replays them when connectivity returns.

pub mod config;
pub mod model;
pub mod network;
pub mod storage;
pub mod worker;

pub use config::WorkerConfig;
pub use model::{
    ChatSummary, DirectMessage, SendGroupMessage, SendMessage, SendOutcome,
};
#[cfg(feature = "network")]
pub use network::{HttpClientConfig, ReqwestTransport};
pub use network::{
    HttpRequest, HttpResponse, HttpTransport, Method, MockTransport, NetworkError,
    TransportResult,
};
pub use storage::{CachedResponse, OutboxEntry, Storage, StorageError};
pub use worker::{
    classify, ClientHub, ClientMessage, FetchPolicy, FlushReport, MemoryClientHub,
    MemoryNotificationHost, MockScheduler, Notification, NotificationHost, NullScheduler,
    OfflineWorker, PushPayload, SyncError, SyncScheduler, WorkerError,
};
