// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push notifications.
//!
//! Push delivery is fire-and-forget: a payload comes in, a notification
//! goes up, a tap routes back to the application. Malformed payloads are
//! substituted with configured defaults, never dropped.

use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::config::WorkerConfig;

/// The JSON body a push event may carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PushPayload {
    /// Parses raw push data, best-effort. Absent or malformed data yields
    /// an empty payload whose fields fall back to config defaults.
    pub fn parse(data: Option<&[u8]>) -> Self {
        data.and_then(|d| serde_json::from_slice(d).ok())
            .unwrap_or_default()
    }
}

/// A user-facing notification, ready for the host to display.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// Vibration pattern (ms on/off/on).
    pub vibrate: Vec<u32>,
    /// Where a tap on this notification routes.
    pub url: String,
}

impl Notification {
    /// Builds a notification from a push payload, filling gaps from config.
    pub fn from_push(config: &WorkerConfig, payload: &PushPayload) -> Self {
        Notification {
            title: payload
                .title
                .clone()
                .unwrap_or_else(|| config.notification_title.clone()),
            body: payload
                .body
                .clone()
                .unwrap_or_else(|| config.notification_body.clone()),
            icon: config.notification_icon.clone(),
            vibrate: config.vibration_pattern.clone(),
            url: config.notification_url.clone(),
        }
    }
}

/// Host-side surface for displaying notifications and routing taps.
pub trait NotificationHost: Send + Sync {
    /// Displays a notification. No delivery confirmation is expected.
    fn show(&self, notification: &Notification);

    /// Focuses or opens an application window at the given URL.
    fn open_window(&self, url: &str);
}

/// Recording host for tests and headless environments.
#[derive(Default)]
pub struct MemoryNotificationHost {
    shown: Mutex<Vec<Notification>>,
    opened: Mutex<Vec<String>>,
}

impl MemoryNotificationHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn opened_windows(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl NotificationHost for MemoryNotificationHost {
    fn show(&self, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
    }

    fn open_window(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}
