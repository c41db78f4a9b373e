//! Visitor-count state types.

use serde::{Deserialize, Serialize};

/// Authoritative visitor count as delivered by the remote API.
///
/// Wire shape: `{ "totalVisits": <n> }`, shared by the pull endpoint and
/// the push-channel update event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitCount {
    /// Total recorded visits, never negative.
    #[serde(rename = "totalVisits")]
    pub total_visits: u64,
}

impl VisitCount {
    /// Create a count from a raw value.
    #[must_use]
    pub fn new(total_visits: u64) -> Self {
        Self { total_visits }
    }
}

/// Liveness of the push channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// Push channel is live; unsolicited updates may arrive.
    Connected,
    /// Push channel is down; the last-known count stays on display.
    #[default]
    Disconnected,
}

impl ConnectionState {
    /// True when the push channel is live.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Result of the initial pull fetch.
///
/// An `Error` state never blanks the last-known count; staleness is
/// preferred over an empty display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Fetch in flight; nothing received yet.
    #[default]
    Loading,
    /// A count has been received at least once.
    Ready,
    /// The most recent fetch failed with the given message.
    Error(String),
}

impl LoadState {
    /// True once a count has been received.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// True while the initial fetch is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Message of the most recent fetch failure, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
