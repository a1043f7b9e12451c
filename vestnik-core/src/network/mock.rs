// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock transport for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::error::NetworkError;
use super::message::{HttpRequest, HttpResponse, Method};
use super::transport::{HttpTransport, TransportResult};

#[derive(Default)]
struct MockState {
    /// Scripted responses keyed by (method, url).
    responses: HashMap<(Method, String), HttpResponse>,
    /// When true, every request fails as if the network were down.
    offline: bool,
    /// Every request the transport saw, in order.
    log: Vec<HttpRequest>,
}

/// Scriptable in-memory transport.
///
/// Clones share state, so a test can keep a handle for assertions while
/// the worker owns another.
///
/// # Example
///
/// ```
/// use vestnik_core::network::{HttpRequest, HttpTransport, MockTransport, Method};
///
/// let transport = MockTransport::new();
/// transport.respond_json(Method::Get, "/api/feed", 200, &serde_json::json!([]));
/// let res = transport.execute(&HttpRequest::get("/api/feed")).unwrap();
/// assert!(res.is_success());
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a response for a (method, url) pair.
    pub fn respond(&self, method: Method, url: &str, response: HttpResponse) {
        let mut state = self.state.lock().unwrap();
        state.responses.insert((method, url.to_string()), response);
    }

    /// Scripts a JSON response for a (method, url) pair.
    pub fn respond_json(
        &self,
        method: Method,
        url: &str,
        status: u16,
        value: &serde_json::Value,
    ) {
        self.respond(method, url, HttpResponse::json(status, value));
    }

    /// Removes any scripted response for a (method, url) pair.
    pub fn clear_response(&self, method: Method, url: &str) {
        let mut state = self.state.lock().unwrap();
        state.responses.remove(&(method, url.to_string()));
    }

    /// Simulates loss or restoration of connectivity.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Returns a copy of every request seen so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().log.clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().log.len()
    }

    /// Clears the request log.
    pub fn clear_log(&self) {
        self.state.lock().unwrap().log.clear();
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.log.push(request.clone());

        if state.offline {
            return Err(NetworkError::Offline("mock transport is offline".into()));
        }

        match state.responses.get(&(request.method, request.url.clone())) {
            Some(response) => Ok(response.clone()),
            // Unscripted urls behave like an unreachable host rather than
            // a 404, so tests exercise the connectivity-failure paths by
            // default.
            None => Err(NetworkError::Offline(format!(
                "no scripted response for {} {}",
                request.method, request.url
            ))),
        }
    }
}
