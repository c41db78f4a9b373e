//! End-to-end counter behavior against a fake count source and a real hub.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use cpc_api::{ApiError, ChannelHub, CountSource, Result, VISIT_COUNT_EVENT};
use cpc_counter::{COUNT_ANIMATION_DURATION, LiveCounter, POLL_INTERVAL};
use cpc_model::{ConnectionState, LoadState, VisitCount};

struct FakeSource {
    responses: Mutex<Vec<Result<VisitCount>>>,
    calls: Mutex<u64>,
}

impl FakeSource {
    fn new(responses: Vec<Result<VisitCount>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(0),
        }
    }

    fn ok(count: u64) -> Self {
        Self::new(vec![Ok(VisitCount::new(count))])
    }

    fn calls(&self) -> u64 {
        *self.calls.lock().unwrap()
    }
}

impl CountSource for FakeSource {
    fn fetch_count(&self) -> Result<VisitCount> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses[0].as_ref().copied().map_err(|_| ApiError::Network(
                "connection refused".to_string(),
            ))
        }
    }
}

#[test]
fn initial_fetch_populates_the_count() {
    let counter = LiveCounter::new();
    let source = FakeSource::ok(42);
    let start = Instant::now();

    assert!(counter.load_state().is_loading());
    counter.refresh(&source, start);

    assert!(counter.load_state().is_ready());
    assert_eq!(counter.value(), 42);
    assert_eq!(counter.displayed(start + COUNT_ANIMATION_DURATION), 42);
}

#[test]
fn fetch_failure_reports_error_without_blanking() {
    let counter = LiveCounter::new();
    let start = Instant::now();

    let failing = FakeSource::new(vec![Err(ApiError::Network("down".to_string()))]);
    counter.refresh(&failing, start);
    assert!(counter.load_state().error_message().is_some());

    // A later success clears the error.
    let source = FakeSource::ok(7);
    counter.refresh(&source, start + POLL_INTERVAL);
    assert!(counter.load_state().is_ready());

    // A failure after success reports the error but keeps the last-known
    // value on display.
    let failing = FakeSource::new(vec![Err(ApiError::Network("down".to_string()))]);
    counter.refresh(&failing, start + POLL_INTERVAL * 2);
    assert_eq!(counter.value(), 7);
    assert!(counter.load_state().error_message().is_some());
    assert_eq!(counter.displayed(start + POLL_INTERVAL * 3), 7);
}

#[test]
fn poll_interval_gates_refreshes() {
    let counter = LiveCounter::new();
    let source = FakeSource::ok(1);
    let start = Instant::now();

    assert!(counter.poll_due(start));
    counter.refresh(&source, start);
    assert!(!counter.poll_due(start + Duration::from_secs(3)));
    assert!(counter.poll_due(start + POLL_INTERVAL));
    assert_eq!(source.calls(), 1);
}

#[test]
fn push_update_mid_animation_lands_on_the_new_target() {
    let counter = LiveCounter::new();
    let hub = Arc::new(ChannelHub::new());
    counter.attach(&hub);

    let start = Instant::now();
    let source = FakeSource::ok(42);
    counter.refresh(&source, start);

    // Sample midway through the ease toward 42, then push 45.
    let midway = start + Duration::from_millis(500);
    let shown = counter.displayed(midway);
    assert!(shown < 42);

    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": 45}));
    assert_eq!(counter.value(), 45);
    assert_eq!(
        counter.displayed(midway + COUNT_ANIMATION_DURATION),
        45
    );
}

#[test]
fn malformed_push_payloads_are_ignored() {
    let counter = LiveCounter::new();
    let hub = Arc::new(ChannelHub::new());
    counter.attach(&hub);

    let start = Instant::now();
    counter.refresh(&FakeSource::ok(42), start);

    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": "soon"}));
    hub.emit(VISIT_COUNT_EVENT, &json!({"visits": 9}));
    hub.emit(VISIT_COUNT_EVENT, &serde_json::Value::Null);

    assert_eq!(counter.value(), 42);
}

#[test]
fn disconnect_keeps_the_last_value() {
    let counter = LiveCounter::new();
    let hub = Arc::new(ChannelHub::new());
    counter.attach(&hub);

    hub.set_connected(true);
    assert_eq!(counter.connection_state(), ConnectionState::Connected);

    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": 30}));
    hub.set_connected(false);

    assert_eq!(counter.connection_state(), ConnectionState::Disconnected);
    assert_eq!(counter.value(), 30);
}

#[test]
fn teardown_stops_all_feeds() {
    let counter = LiveCounter::new();
    let hub = Arc::new(ChannelHub::new());
    counter.attach(&hub);

    let start = Instant::now();
    counter.refresh(&FakeSource::ok(10), start);
    counter.teardown();

    // Neither pushes nor fetches move the counter afterwards.
    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": 99}));
    counter.refresh(&FakeSource::ok(99), start + POLL_INTERVAL);

    assert_eq!(counter.value(), 10);
    // Cancelled animation pins the display at its last target.
    assert_eq!(counter.displayed(start + Duration::from_millis(1)), 10);
}

#[test]
fn dropped_counter_never_resurrects_through_the_hub() {
    let hub = Arc::new(ChannelHub::new());
    {
        let counter = LiveCounter::new();
        counter.attach(&hub);
        counter.refresh(&FakeSource::ok(5), Instant::now());
    }
    // The counter is gone; its weakly-held handlers must tolerate this.
    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": 6}));
    hub.set_connected(true);
}

#[test]
fn reattach_replaces_old_subscriptions() {
    let counter = LiveCounter::new();
    let hub = Arc::new(ChannelHub::new());
    counter.attach(&hub);
    counter.attach(&hub);

    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": 3}));
    assert_eq!(counter.value(), 3);

    counter.detach();
    hub.emit(VISIT_COUNT_EVENT, &json!({"totalVisits": 8}));
    assert_eq!(counter.value(), 3);
}

#[test]
fn visibility_reentry_replays_the_count_up() {
    let counter = LiveCounter::new();
    let start = Instant::now();
    counter.refresh(&FakeSource::ok(40), start);
    assert_eq!(counter.displayed(start + COUNT_ANIMATION_DURATION), 40);

    let later = start + Duration::from_secs(30);
    counter.on_visible(later);
    assert_eq!(counter.displayed(later), 0);
    assert_eq!(counter.displayed(later + COUNT_ANIMATION_DURATION), 40);
}

#[test]
fn load_state_transitions() {
    let counter = LiveCounter::new();
    assert_eq!(counter.load_state(), LoadState::Loading);
    counter.refresh(&FakeSource::ok(1), Instant::now());
    assert_eq!(counter.load_state(), LoadState::Ready);
}
