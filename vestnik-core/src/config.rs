//! Configuration for the offline worker.

/// Configuration for the offline worker.
///
/// The defaults reproduce the deployed worker: two versioned caches, the
/// standard asset set, the cacheable API prefixes, and the two write
/// endpoints that queue when offline.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Origin this worker belongs to; requests to other origins pass
    /// through untouched.
    pub origin: String,

    /// Name of the static-asset cache (bump the suffix to invalidate).
    pub static_cache: String,

    /// Name of the API response cache.
    pub api_cache: String,

    /// Assets seeded into the static cache at install time.
    pub static_assets: Vec<String>,

    /// Document served from cache when a navigation fetch fails offline.
    pub fallback_document: String,

    /// Path prefixes whose GET responses are cached (stale-while-revalidate).
    pub cacheable_prefixes: Vec<String>,

    /// Path prefixes that must never be cached (live endpoints).
    pub never_cache_prefixes: Vec<String>,

    /// Exact POST paths that queue to the outbox when offline.
    pub write_endpoints: Vec<String>,

    /// Background-sync tag that triggers an outbox flush.
    pub sync_tag: String,

    /// Notification shown when a push payload is missing or malformed.
    pub notification_title: String,
    pub notification_body: String,
    /// Icon attached to every notification.
    pub notification_icon: String,
    /// Vibration pattern for notifications (ms on/off/on).
    pub vibration_pattern: Vec<u32>,
    /// Where a notification tap routes the user.
    pub notification_url: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:3000".to_string(),
            static_cache: "vestnik-static-v1".to_string(),
            api_cache: "vestnik-api-v1".to_string(),
            static_assets: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/manifest.json".to_string(),
                "/icon-192.svg".to_string(),
                "/icon-512.svg".to_string(),
            ],
            fallback_document: "/index.html".to_string(),
            cacheable_prefixes: vec![
                "/api/chats/".to_string(),
                "/api/messages/".to_string(),
                "/api/group-messages/".to_string(),
                "/api/groups/".to_string(),
                "/api/channels/".to_string(),
                "/api/feed".to_string(),
            ],
            never_cache_prefixes: vec!["/api/stream".to_string()],
            write_endpoints: vec![
                "/api/messages".to_string(),
                "/api/group-messages".to_string(),
            ],
            sync_tag: "flush-outbox".to_string(),
            notification_title: "Vestnik".to_string(),
            notification_body: "New message".to_string(),
            notification_icon: "/icon-192.svg".to_string(),
            vibration_pattern: vec![200, 100, 200],
            notification_url: "/".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Configure for a different origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Bump both cache names to a new version suffix, invalidating the
    /// previous generation on the next activation.
    pub fn with_cache_version(mut self, version: u32) -> Self {
        self.static_cache = format!("vestnik-static-v{}", version);
        self.api_cache = format!("vestnik-api-v{}", version);
        self
    }
}
