//! Counter state machine.
//!
//! One authoritative value, two feeds. The pull feed fetches over REST on
//! a fixed poll interval; the push feed listens on the shared hub for
//! `visitCountUpdated`. Whichever arrives last wins, and the animator
//! eases the displayed value toward it.

use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};

use cpc_api::{
    CONNECT_EVENT, ChannelHub, CountSource, DISCONNECT_EVENT, SubscriptionId, VISIT_COUNT_EVENT,
};
use cpc_model::{ConnectionState, LoadState};

use crate::animation::Animator;

/// How often the pull feed re-fetches.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

struct CounterInner {
    value: u64,
    load_state: LoadState,
    connection_state: ConnectionState,
    animator: Animator,
    alive: bool,
    last_fetch: Option<Instant>,
    subscriptions: Vec<SubscriptionId>,
    hub: Weak<ChannelHub>,
}

impl CounterInner {
    fn apply_count(&mut self, count: u64, now: Instant) {
        if !self.alive {
            return;
        }
        self.value = count;
        self.load_state = LoadState::Ready;
        self.animator.retarget(count, now);
    }
}

/// Live visitor counter.
///
/// Clone-cheap handle; all clones share one state. Handlers registered on
/// the hub hold only a weak reference, so a torn-down counter never
/// resurrects through a late event.
#[derive(Clone)]
pub struct LiveCounter {
    inner: Arc<Mutex<CounterInner>>,
}

impl LiveCounter {
    /// New counter in the loading state, not yet attached to a hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CounterInner {
                value: 0,
                load_state: LoadState::Loading,
                connection_state: ConnectionState::Disconnected,
                animator: Animator::new(),
                alive: true,
                last_fetch: None,
                subscriptions: Vec::new(),
                hub: Weak::new(),
            })),
        }
    }

    /// Fetch the count once and record the result.
    ///
    /// Failures leave the last known value in place and flip the load
    /// state to an error.
    pub fn refresh(&self, source: &dyn CountSource, now: Instant) {
        let result = source.fetch_count();
        let mut inner = self.inner.lock().expect("counter lock poisoned");
        if !inner.alive {
            return;
        }
        inner.last_fetch = Some(now);
        match result {
            Ok(count) => {
                debug!(total = count.total_visits, "count fetched");
                inner.apply_count(count.total_visits, now);
            }
            Err(err) => {
                warn!(%err, "count fetch failed");
                inner.load_state = LoadState::Error(err.user_message());
            }
        }
    }

    /// True when the poll interval has elapsed since the last fetch.
    #[must_use]
    pub fn poll_due(&self, now: Instant) -> bool {
        let inner = self.inner.lock().expect("counter lock poisoned");
        inner
            .last_fetch
            .is_none_or(|last| now.saturating_duration_since(last) >= POLL_INTERVAL)
    }

    /// Subscribe to the hub's count and connectivity events.
    ///
    /// Replaces any prior attachment. The hub is held weakly; it may be
    /// dropped without tearing the counter down.
    pub fn attach(&self, hub: &Arc<ChannelHub>) {
        self.detach();

        let weak = Arc::downgrade(&self.inner);
        let count_sub = hub.subscribe(VISIT_COUNT_EVENT, move |payload| {
            let Some(inner) = weak.upgrade() else { return };
            let Some(count) = parse_push(payload) else {
                debug!("ignoring malformed count event");
                return;
            };
            inner
                .lock()
                .expect("counter lock poisoned")
                .apply_count(count, Instant::now());
        });

        let weak = Arc::downgrade(&self.inner);
        let connect_sub = hub.subscribe(CONNECT_EVENT, move |_| {
            let Some(inner) = weak.upgrade() else { return };
            inner.lock().expect("counter lock poisoned").connection_state =
                ConnectionState::Connected;
        });

        let weak = Arc::downgrade(&self.inner);
        let disconnect_sub = hub.subscribe(DISCONNECT_EVENT, move |_| {
            let Some(inner) = weak.upgrade() else { return };
            inner.lock().expect("counter lock poisoned").connection_state =
                ConnectionState::Disconnected;
        });

        let mut inner = self.inner.lock().expect("counter lock poisoned");
        inner.connection_state = hub.connection_state();
        inner.subscriptions = vec![count_sub, connect_sub, disconnect_sub];
        inner.hub = Arc::downgrade(hub);
    }

    /// Drop hub subscriptions without ending the counter's life.
    pub fn detach(&self) {
        let (hub, subscriptions) = {
            let mut inner = self.inner.lock().expect("counter lock poisoned");
            (inner.hub.upgrade(), std::mem::take(&mut inner.subscriptions))
        };
        if let Some(hub) = hub {
            for id in subscriptions {
                hub.unsubscribe(id);
            }
        }
    }

    /// Replay the count-up from zero, for when the counter scrolls back
    /// into view.
    pub fn on_visible(&self, now: Instant) {
        let mut inner = self.inner.lock().expect("counter lock poisoned");
        if !inner.alive {
            return;
        }
        let value = inner.value;
        inner.animator.restart(0, value, now);
    }

    /// Value to display at `now`, eased toward the authoritative count.
    pub fn displayed(&self, now: Instant) -> u64 {
        let mut inner = self.inner.lock().expect("counter lock poisoned");
        inner.animator.displayed(now)
    }

    /// Authoritative count, ignoring the animation.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.inner.lock().expect("counter lock poisoned").value
    }

    /// Current load state.
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.inner
            .lock()
            .expect("counter lock poisoned")
            .load_state
            .clone()
    }

    /// Push-channel connectivity as last observed.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.inner
            .lock()
            .expect("counter lock poisoned")
            .connection_state
    }

    /// Stop the counter: detach from the hub, cancel the animation, and
    /// ignore anything that arrives later.
    pub fn teardown(&self) {
        self.detach();
        let mut inner = self.inner.lock().expect("counter lock poisoned");
        inner.alive = false;
        inner.animator.cancel();
    }
}

impl Default for LiveCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the count from a pushed payload. Anything without a numeric
/// `totalVisits` is ignored.
fn parse_push(payload: &Value) -> Option<u64> {
    payload.get("totalVisits")?.as_u64()
}
