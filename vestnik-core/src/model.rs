// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Collaborator API payload shapes.
//!
//! The backend is a flat JSON CRUD API; these are the bodies the worker
//! sees going past. Field names on the wire are the server's camelCase.

use serde::{Deserialize, Serialize};

/// One row of `GET /api/chats/:myId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread: Option<u32>,
}

/// One row of `GET /api/messages/:myId/:otherId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMessage {
    #[serde(rename = "fromId")]
    pub from_id: String,
    #[serde(rename = "toId")]
    pub to_id: String,
    pub text: String,
    pub time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<serde_json::Value>,
}

/// Body of `POST /api/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    #[serde(rename = "fromId")]
    pub from_id: String,
    #[serde(rename = "toId")]
    pub to_id: String,
    pub text: String,
}

/// Body of `POST /api/group-messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendGroupMessage {
    #[serde(rename = "fromId")]
    pub from_id: String,
    #[serde(rename = "groupId")]
    pub group_id: String,
    pub text: String,
}

/// Outcome of a write: the server ack (`success: true`) and the locally
/// synthesized queued response (`success: false, queued: true`) both
/// deserialize into this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queued: Option<bool>,
}

impl SendOutcome {
    /// The response handed back when a write was captured into the outbox
    /// instead of delivered. Distinct from a server success so the UI can
    /// mark the message pending rather than confirmed.
    pub fn queued() -> Self {
        SendOutcome {
            success: false,
            queued: Some(true),
        }
    }
}
