//! REST client and push-channel plumbing for the campus portal.
//!
//! The remote API is consumed, never implemented, by this workspace:
//! everything here is request/response glue, structured error extraction,
//! and the shared event hub the live counter listens on.

pub mod client;
pub mod config;
pub mod error;
pub mod hub;
pub mod payload;

pub use client::{ApiClient, CountSource, SubmitAck, SubmissionEndpoint};
pub use config::Config;
pub use error::{ApiError, Result};
pub use hub::{
    CONNECT_EVENT, ChannelHub, DISCONNECT_EVENT, SubscriptionId, VISIT_COUNT_EVENT,
};
pub use payload::{PayloadPart, SubmissionPayload};
