// SPDX-FileCopyrightText: 2026 Vestnik Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Request classification.
//!
//! Every intercepted fetch maps to exactly one policy. Classification is
//! pure string work on method and path, so it lives apart from the
//! side-effecting worker.

use crate::config::WorkerConfig;
use crate::network::{HttpRequest, Method};

/// The handling policy for one intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Navigation/HTML fetch: network first, cached document as fallback.
    Document,
    /// Cacheable API read: stale-while-revalidate, never a hard failure.
    CachedApiRead,
    /// Write endpoint: deliver or queue to the outbox.
    QueuedWrite,
    /// Everything else, including foreign origins and live endpoints.
    PassThrough,
}

/// Classifies a request against the configured routes.
pub fn classify(config: &WorkerConfig, request: &HttpRequest) -> FetchPolicy {
    let Some(path) = same_origin_path(config, &request.url) else {
        return FetchPolicy::PassThrough;
    };

    match request.method {
        Method::Get if is_document(path) => FetchPolicy::Document,
        Method::Get if is_api_cacheable(config, path) => FetchPolicy::CachedApiRead,
        Method::Post if is_write_endpoint(config, path) => FetchPolicy::QueuedWrite,
        _ => FetchPolicy::PassThrough,
    }
}

/// Extracts the path of a same-origin request, or `None` for a foreign
/// origin. Relative paths are always same-origin.
pub fn same_origin_path<'a>(config: &WorkerConfig, url: &'a str) -> Option<&'a str> {
    if let Some(rest) = url.strip_prefix(&config.origin) {
        // Bare origin, with or without a query, is the root document
        if rest.is_empty() || rest.starts_with('?') {
            return Some("/");
        }
        if rest.starts_with('/') {
            return Some(rest);
        }
        // Prefix matched mid-host (e.g. origin "http://a" vs "http://ab")
        return None;
    }

    if url.starts_with('/') {
        return Some(url);
    }

    None
}

fn is_document(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    path == "/" || path.ends_with(".html")
}

fn is_api_cacheable(config: &WorkerConfig, path: &str) -> bool {
    // Live endpoints are hard-excluded before the cacheable prefixes are
    // consulted; /api/stream* must never enter a cache.
    if config
        .never_cache_prefixes
        .iter()
        .any(|p| path.starts_with(p.as_str()))
    {
        return false;
    }

    config
        .cacheable_prefixes
        .iter()
        .any(|p| path.starts_with(p.as_str()))
}

fn is_write_endpoint(config: &WorkerConfig, path: &str) -> bool {
    config.write_endpoints.iter().any(|e| e == path)
}

/// True for paths whose empty placeholder is a list rather than a map.
pub fn placeholder_is_list(path: &str) -> bool {
    path.contains("message")
}
