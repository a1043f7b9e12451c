//! Client messaging.
//!
//! The worker reports replay outcomes back to every live application
//! instance so optimistic UI state can reconcile. Hosts implement
//! [`ClientHub`]; the wire shape is fixed.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::storage::OutboxEntry;

/// A message posted to live application instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// A queued write was replayed and acknowledged by the server.
    #[serde(rename = "MSG_SENT")]
    MessageSent {
        /// The outbox entry that was delivered.
        item: OutboxEntry,
    },
}

/// Host-side surface for reaching live application instances.
///
/// Broadcast is fire-and-forget: delivery to a client that is mid-teardown
/// is allowed to vanish, and the worker never waits on it.
pub trait ClientHub: Send + Sync {
    /// Posts a message to every live client.
    fn broadcast(&self, message: &ClientMessage);

    /// Takes control of clients started under a previous worker version.
    fn claim(&self) {}
}

/// In-memory hub that records everything, for tests and headless hosts.
#[derive(Default)]
pub struct MemoryClientHub {
    messages: Mutex<Vec<ClientMessage>>,
    claimed: Mutex<bool>,
}

impl MemoryClientHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Messages broadcast so far, in order.
    pub fn messages(&self) -> Vec<ClientMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn was_claimed(&self) -> bool {
        *self.claimed.lock().unwrap()
    }
}

impl ClientHub for MemoryClientHub {
    fn broadcast(&self, message: &ClientMessage) {
        self.messages.lock().unwrap().push(message.clone());
    }

    fn claim(&self) {
        *self.claimed.lock().unwrap() = true;
    }
}
