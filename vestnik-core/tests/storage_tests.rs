//! Tests for the durable storage substrate: outbox queue and named
//! response caches.

use serde_json::json;
use vestnik_core::{CachedResponse, Storage};

fn test_storage() -> Storage {
    Storage::in_memory().unwrap()
}

fn cached(url: &str, body: &[u8]) -> CachedResponse {
    CachedResponse {
        url: url.to_string(),
        status: 200,
        content_type: Some("application/json".to_string()),
        body: body.to_vec(),
        fetched_at: 1_700_000_000,
    }
}

// === Outbox Tests ===

#[test]
fn test_outbox_insertion_order() {
    let storage = test_storage();

    for i in 0..5 {
        storage
            .outbox_enqueue("/api/messages", &json!({ "text": format!("msg-{}", i) }))
            .unwrap();
    }

    let entries = storage.outbox_entries().unwrap();
    assert_eq!(entries.len(), 5);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.body["text"], format!("msg-{}", i));
    }
    // Keys are strictly increasing
    for pair in entries.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
}

#[test]
fn test_outbox_entry_fields() {
    let storage = test_storage();
    let body = json!({"fromId": "1001", "toId": "1002", "text": "hi"});

    let id = storage.outbox_enqueue("/api/messages", &body).unwrap();
    let entries = storage.outbox_entries().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].url, "/api/messages");
    assert_eq!(entries[0].body, body);
    assert!(entries[0].enqueued_at > 0);
}

#[test]
fn test_outbox_remove_is_idempotent() {
    let storage = test_storage();
    let id = storage.outbox_enqueue("/api/messages", &json!({})).unwrap();

    assert!(storage.outbox_remove(id).unwrap());
    assert!(!storage.outbox_remove(id).unwrap());
    assert!(!storage.outbox_remove(id + 100).unwrap());
    assert_eq!(storage.outbox_count().unwrap(), 0);
}

#[test]
fn test_outbox_remove_preserves_order_of_rest() {
    let storage = test_storage();
    let ids: Vec<i64> = (0..4)
        .map(|i| {
            storage
                .outbox_enqueue("/api/messages", &json!({ "n": i }))
                .unwrap()
        })
        .collect();

    storage.outbox_remove(ids[1]).unwrap();

    let remaining: Vec<i64> = storage
        .outbox_entries()
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn test_outbox_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("vestnik.db");

    {
        let storage = Storage::open(&path).unwrap();
        storage
            .outbox_enqueue("/api/messages", &json!({"text": "queued offline"}))
            .unwrap();
        storage
            .cache_put("vestnik-api-v1", &cached("/api/feed", b"[]"))
            .unwrap();
    }

    let storage = Storage::open(&path).unwrap();
    let entries = storage.outbox_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].body["text"], "queued offline");
    assert!(storage
        .cache_match("vestnik-api-v1", "/api/feed")
        .unwrap()
        .is_some());
    assert_eq!(storage.schema_version().unwrap(), 1);
}

// === Cache Tests ===

#[test]
fn test_cache_put_and_match() {
    let storage = test_storage();

    storage
        .cache_put("vestnik-api-v1", &cached("/api/chats/1001", b"[{\"id\":\"1002\"}]"))
        .unwrap();

    let hit = storage
        .cache_match("vestnik-api-v1", "/api/chats/1001")
        .unwrap()
        .unwrap();
    assert_eq!(hit.status, 200);
    assert_eq!(hit.body, b"[{\"id\":\"1002\"}]");

    assert!(storage
        .cache_match("vestnik-api-v1", "/api/chats/9999")
        .unwrap()
        .is_none());
}

#[test]
fn test_cache_entry_is_most_recent() {
    let storage = test_storage();

    storage
        .cache_put("vestnik-api-v1", &cached("/api/feed", b"[1]"))
        .unwrap();
    storage
        .cache_put("vestnik-api-v1", &cached("/api/feed", b"[1,2,3]"))
        .unwrap();

    let hit = storage
        .cache_match("vestnik-api-v1", "/api/feed")
        .unwrap()
        .unwrap();
    assert_eq!(hit.body, b"[1,2,3]");
    assert_eq!(storage.cache_count("vestnik-api-v1").unwrap(), 1);
}

#[test]
fn test_delete_cache_only_touches_named_cache() {
    let storage = test_storage();

    storage
        .cache_put("vestnik-static-v0", &cached("/", b"old"))
        .unwrap();
    storage
        .cache_put("vestnik-static-v1", &cached("/", b"new"))
        .unwrap();

    assert_eq!(storage.delete_cache("vestnik-static-v0").unwrap(), 1);
    assert!(storage.cache_match("vestnik-static-v0", "/").unwrap().is_none());
    assert_eq!(
        storage.cache_match("vestnik-static-v1", "/").unwrap().unwrap().body,
        b"new"
    );
    // Deleting an absent cache is a no-op
    assert_eq!(storage.delete_cache("no-such-cache").unwrap(), 0);
}

// === Property Tests ===

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Replay order is insertion order, whatever gets enqueued.
        #[test]
        fn outbox_is_fifo(texts in proptest::collection::vec(".{0,32}", 0..20)) {
            let storage = test_storage();
            for text in &texts {
                storage.outbox_enqueue("/api/messages", &json!({ "text": text })).unwrap();
            }

            let listed: Vec<String> = storage
                .outbox_entries()
                .unwrap()
                .iter()
                .map(|e| e.body["text"].as_str().unwrap().to_string())
                .collect();
            prop_assert_eq!(listed, texts);
        }

        /// Removing any subset keeps the survivors in original order.
        #[test]
        fn outbox_removal_keeps_relative_order(
            count in 1usize..15,
            seed in any::<u64>(),
        ) {
            let storage = test_storage();
            let ids: Vec<i64> = (0..count)
                .map(|i| storage.outbox_enqueue("/api/messages", &json!({ "n": i })).unwrap())
                .collect();

            let keep: Vec<i64> = ids
                .iter()
                .enumerate()
                .filter(|(i, _)| (seed >> (i % 64)) & 1 == 0)
                .map(|(_, id)| *id)
                .collect();
            for id in &ids {
                if !keep.contains(id) {
                    storage.outbox_remove(*id).unwrap();
                }
            }

            let listed: Vec<i64> = storage.outbox_entries().unwrap().iter().map(|e| e.id).collect();
            prop_assert_eq!(listed, keep);
        }
    }
}
