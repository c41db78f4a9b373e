//! In-process push channel.
//!
//! Stands in for the portal's server-pushed event stream: producers call
//! [`ChannelHub::emit`], consumers register handlers per event name. The
//! hub also tracks channel connectivity and announces transitions as
//! events of their own, so consumers can react to drops the same way they
//! react to data.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use cpc_model::ConnectionState;

/// Event carrying a fresh visitor count.
pub const VISIT_COUNT_EVENT: &str = "visitCountUpdated";

/// Event fired when the channel comes up.
pub const CONNECT_EVENT: &str = "connect";

/// Event fired when the channel goes down.
pub const DISCONNECT_EVENT: &str = "disconnect";

/// Handle returned by [`ChannelHub::subscribe`], used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&Value) + Send + Sync>;

struct HubInner {
    next_id: u64,
    connected: bool,
    handlers: Vec<(SubscriptionId, String, Handler)>,
}

/// Shared event hub for push-channel traffic.
pub struct ChannelHub {
    inner: Mutex<HubInner>,
}

impl ChannelHub {
    /// New hub, initially disconnected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HubInner {
                next_id: 0,
                connected: false,
                handlers: Vec::new(),
            }),
        }
    }

    /// Register a handler for an event name.
    pub fn subscribe(
        &self,
        event: impl Into<String>,
        handler: impl Fn(&Value) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.lock().expect("hub lock poisoned");
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((id, event.into(), Arc::new(handler)));
        id
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock().expect("hub lock poisoned");
        inner.handlers.retain(|(handler_id, _, _)| *handler_id != id);
    }

    /// Deliver an event to every matching handler.
    ///
    /// Handlers run outside the hub lock, so they may subscribe or
    /// unsubscribe without deadlocking.
    pub fn emit(&self, event: &str, payload: &Value) {
        let matching: Vec<Handler> = {
            let inner = self.inner.lock().expect("hub lock poisoned");
            inner
                .handlers
                .iter()
                .filter(|(_, name, _)| name == event)
                .map(|(_, _, handler)| Arc::clone(handler))
                .collect()
        };
        debug!(event, handlers = matching.len(), "dispatching");
        for handler in matching {
            handler(payload);
        }
    }

    /// Record a connectivity transition and announce it.
    ///
    /// Repeated calls with the same state are no-ops.
    pub fn set_connected(&self, connected: bool) {
        {
            let mut inner = self.inner.lock().expect("hub lock poisoned");
            if inner.connected == connected {
                return;
            }
            inner.connected = connected;
        }
        let event = if connected { CONNECT_EVENT } else { DISCONNECT_EVENT };
        self.emit(event, &Value::Null);
    }

    /// Current connectivity.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        let inner = self.inner.lock().expect("hub lock poisoned");
        if inner.connected {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new()
    }
}
