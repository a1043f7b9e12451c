// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP request/response types used across the transport seam.

/// HTTP method, reduced to what the worker routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// An outbound HTTP request.
///
/// `url` is either a same-origin path (`/api/...`) or an absolute URL;
/// the router decides which policy applies based on that distinction.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Builds a GET request for a path or URL.
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    /// Builds a POST request carrying a JSON body.
    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Self {
        HttpRequest {
            method: Method::Post,
            url: url.into(),
            // Serializing a Value cannot fail
            body: Some(serde_json::to_vec(body).unwrap_or_default()),
        }
    }

    /// Parses the request body as JSON, best-effort.
    ///
    /// A missing or malformed body yields an empty object; a queued write
    /// must never be dropped because its body didn't parse.
    pub fn body_json_lenient(&self) -> serde_json::Value {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Builds a JSON response with the given status.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        HttpResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }

    /// True for 2xx statuses. This is the worker's sole notion of a
    /// server-acknowledged success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lenient_body_defaults_to_empty_object() {
        let req = HttpRequest {
            method: Method::Post,
            url: "/api/messages".into(),
            body: Some(b"not json".to_vec()),
        };
        assert_eq!(req.body_json_lenient(), json!({}));

        let req = HttpRequest::post_json("/api/messages", &json!({"text": "hi"}));
        assert_eq!(req.body_json_lenient(), json!({"text": "hi"}));
    }

    #[test]
    fn success_is_2xx_only() {
        assert!(HttpResponse::json(200, &json!({})).is_success());
        assert!(HttpResponse::json(204, &json!({})).is_success());
        assert!(!HttpResponse::json(302, &json!({})).is_success());
        assert!(!HttpResponse::json(404, &json!({})).is_success());
        assert!(!HttpResponse::json(500, &json!({})).is_success());
    }
}
