// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Offline Worker Module
//!
//! The interception layer and everything it coordinates.
//!
//! # Architecture
//!
//! - **Router**: classifies each fetch into a handling policy
//! - **Worker**: the orchestrator (lifecycle, fetch, sync, push)
//! - **Sync**: scheduler seam and the single-flight flush engine
//! - **Events**: messages back to live application instances
//! - **Notifications**: push payloads and the notification host seam

#[cfg(feature = "testing")]
pub mod events;
#[cfg(not(feature = "testing"))]
mod events;

#[cfg(feature = "testing")]
pub mod notifications;
#[cfg(not(feature = "testing"))]
mod notifications;

#[cfg(feature = "testing")]
pub mod router;
#[cfg(not(feature = "testing"))]
mod router;

#[cfg(feature = "testing")]
pub mod sync;
#[cfg(not(feature = "testing"))]
mod sync;

#[cfg(feature = "testing")]
pub mod worker;
#[cfg(not(feature = "testing"))]
mod worker;

// Routing
pub use router::{classify, FetchPolicy};

// Orchestrator
pub use worker::{OfflineWorker, WorkerError};

// Sync engine
pub use sync::{FlushReport, MockScheduler, NullScheduler, SyncError, SyncScheduler};

// Client messaging
pub use events::{ClientHub, ClientMessage, MemoryClientHub};

// Notifications
pub use notifications::{
    MemoryNotificationHost, Notification, NotificationHost, PushPayload,
};
