//! Live visitor counter.
//!
//! The counter keeps one authoritative value fed from two directions: a
//! pull fetch against the REST API and pushed updates from the event hub.
//! A short easing animation bridges the displayed value between targets;
//! new targets cancel the animation in flight rather than queueing behind
//! it.

pub mod animation;
pub mod counter;

pub use animation::{Animator, COUNT_ANIMATION_DURATION, CountAnimation};
pub use counter::{LiveCounter, POLL_INTERVAL};
