// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking reqwest-based transport (feature `network`).

use std::time::Duration;

use reqwest::blocking::Client;

use super::error::NetworkError;
use super::message::{HttpRequest, HttpResponse, Method};
use super::transport::{HttpTransport, TransportResult};

/// Configuration for the reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Origin requests with relative paths are resolved against,
    /// e.g. `https://app.example`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP transport backed by a blocking reqwest client.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport from config.
    pub fn new(config: &HttpClientConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "Vestnik/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ))
            .build()
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let url = self.absolute_url(&request.url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.clone());
        }

        let response = builder.send().map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .bytes()
            .map_err(map_reqwest_error)?
            .to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// A send error means no response arrived, which the worker treats as a
/// connectivity failure. Only malformed targets are classed differently.
fn map_reqwest_error(e: reqwest::Error) -> NetworkError {
    if e.is_builder() {
        NetworkError::InvalidUrl(e.to_string())
    } else {
        NetworkError::Offline(e.to_string())
    }
}
