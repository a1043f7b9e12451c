//! Tests for the outbox flush engine: at-most-once replay, FIFO order,
//! failure isolation, and delivery events.

use std::sync::Arc;

use serde_json::json;
use vestnik_core::{
    ClientMessage, FlushReport, HttpRequest, MemoryClientHub, MemoryNotificationHost,
    Method, MockScheduler, MockTransport, OfflineWorker, Storage, WorkerConfig,
};

struct TestBed {
    worker: OfflineWorker<MockTransport>,
    transport: MockTransport,
    clients: Arc<MemoryClientHub>,
}

fn test_bed() -> TestBed {
    let transport = MockTransport::new();
    let clients = MemoryClientHub::new();
    let worker = OfflineWorker::new(
        WorkerConfig::default(),
        Storage::in_memory().unwrap(),
        transport.clone(),
        MockScheduler::new(),
        clients.clone(),
        MemoryNotificationHost::new(),
    );
    TestBed {
        worker,
        transport,
        clients,
    }
}

/// Queues a write by attempting it while the transport is offline.
fn queue_offline(bed: &TestBed, url: &str, body: serde_json::Value) {
    bed.transport.set_offline(true);
    bed.worker
        .handle_fetch(&HttpRequest::post_json(url, &body))
        .unwrap();
    bed.transport.set_offline(false);
}

#[test]
fn test_reconnect_replays_queued_message() {
    let bed = test_bed();
    let body = json!({"fromId": "1001", "toId": "1002", "text": "hi"});
    queue_offline(&bed, "/api/messages", body.clone());
    bed.transport.clear_log();

    bed.transport
        .respond_json(Method::Post, "/api/messages", 200, &json!({"success": true}));

    let report = bed.worker.handle_sync("flush-outbox").unwrap();
    assert_eq!(
        report,
        FlushReport {
            attempted: 1,
            delivered: 1,
            failed: 0
        }
    );

    // Replayed with the recorded body
    let requests = bed.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "/api/messages");
    assert_eq!(requests[0].body_json_lenient(), body);

    // Entry removed, delivery broadcast to live clients
    assert_eq!(bed.worker.storage().outbox_count().unwrap(), 0);
    let messages = bed.clients.messages();
    assert_eq!(messages.len(), 1);
    let ClientMessage::MessageSent { item } = &messages[0];
    assert_eq!(item.url, "/api/messages");
    assert_eq!(item.body, body);
}

#[test]
fn test_failing_entry_does_not_block_later_entries() {
    let bed = test_bed();
    queue_offline(&bed, "/api/messages", json!({"n": 1}));
    queue_offline(&bed, "/api/group-messages", json!({"n": 2}));
    queue_offline(&bed, "/api/messages", json!({"n": 3}));
    bed.transport.clear_log();

    // Direct messages deliver; group messages stay unreachable
    bed.transport
        .respond_json(Method::Post, "/api/messages", 200, &json!({"success": true}));

    let report = bed.worker.flush().unwrap();
    assert_eq!(
        report,
        FlushReport {
            attempted: 3,
            delivered: 2,
            failed: 1
        }
    );

    // Exactly one attempt per entry, in insertion order
    let attempts: Vec<String> = bed.transport.requests().iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        attempts,
        vec!["/api/messages", "/api/group-messages", "/api/messages"]
    );

    // Only the failed entry remains, for the next flush
    let remaining = bed.worker.storage().outbox_entries().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].body, json!({"n": 2}));
    assert_eq!(bed.clients.message_count(), 2);
}

#[test]
fn test_server_rejection_keeps_entry_queued() {
    let bed = test_bed();
    queue_offline(&bed, "/api/messages", json!({"text": "hi"}));

    bed.transport
        .respond_json(Method::Post, "/api/messages", 400, &json!({"success": false}));

    let report = bed.worker.flush().unwrap();
    assert_eq!(report.delivered, 0);
    assert_eq!(report.failed, 1);

    // Never destroyed on failure; no delivery event either
    assert_eq!(bed.worker.storage().outbox_count().unwrap(), 1);
    assert_eq!(bed.clients.message_count(), 0);
}

#[test]
fn test_flush_with_empty_outbox_is_a_noop() {
    let bed = test_bed();

    let report = bed.worker.handle_sync("flush-outbox").unwrap();

    assert_eq!(report, FlushReport::default());
    assert_eq!(bed.transport.request_count(), 0);
    assert_eq!(bed.clients.message_count(), 0);
}

#[test]
fn test_unknown_sync_tag_is_ignored() {
    let bed = test_bed();
    queue_offline(&bed, "/api/messages", json!({"text": "hi"}));
    bed.transport.clear_log();

    let report = bed.worker.handle_sync("periodic-cleanup").unwrap();

    assert_eq!(report, FlushReport::default());
    assert_eq!(bed.transport.request_count(), 0);
    assert_eq!(bed.worker.storage().outbox_count().unwrap(), 1);
}

#[test]
fn test_second_flush_retries_what_the_first_left() {
    let bed = test_bed();
    queue_offline(&bed, "/api/messages", json!({"text": "hi"}));

    // First flush: still offline, entry stays
    bed.transport.set_offline(true);
    let first = bed.worker.flush().unwrap();
    assert_eq!(first.failed, 1);
    assert_eq!(bed.worker.storage().outbox_count().unwrap(), 1);

    // Second flush after reconnect delivers it
    bed.transport.set_offline(false);
    bed.transport
        .respond_json(Method::Post, "/api/messages", 200, &json!({"success": true}));
    let second = bed.worker.flush().unwrap();
    assert_eq!(second.delivered, 1);
    assert_eq!(bed.worker.storage().outbox_count().unwrap(), 0);
}

#[test]
fn test_delivered_wire_message_matches_contract() {
    let bed = test_bed();
    queue_offline(&bed, "/api/messages", json!({"fromId": "1001", "toId": "1002", "text": "hi"}));
    bed.transport
        .respond_json(Method::Post, "/api/messages", 200, &json!({"success": true}));

    bed.worker.flush().unwrap();

    let wire = serde_json::to_value(&bed.clients.messages()[0]).unwrap();
    assert_eq!(wire["type"], "MSG_SENT");
    assert_eq!(wire["item"]["url"], "/api/messages");
    assert_eq!(wire["item"]["body"]["fromId"], "1001");
}
