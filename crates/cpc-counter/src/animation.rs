//! Eased count animation.
//!
//! The displayed value tweens from its previous position to each new
//! target over a fixed duration with a quadratic ease-out, so late frames
//! slow into the target. Time is supplied by the caller, which keeps
//! sampling deterministic.

use std::time::{Duration, Instant};

/// How long one count transition runs.
pub const COUNT_ANIMATION_DURATION: Duration = Duration::from_secs(1);

/// One in-flight transition between two values.
#[derive(Debug, Clone, Copy)]
pub struct CountAnimation {
    from: u64,
    target: u64,
    started_at: Instant,
    duration: Duration,
}

impl CountAnimation {
    /// Start a transition at `now`.
    #[must_use]
    pub fn new(from: u64, target: u64, now: Instant) -> Self {
        Self {
            from,
            target,
            started_at: now,
            duration: COUNT_ANIMATION_DURATION,
        }
    }

    /// Value the animation ends on.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Displayed value at `now`. Clamped to the target once the duration
    /// has elapsed.
    #[must_use]
    pub fn sample(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return self.target;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        let from = self.from as f64;
        let target = self.target as f64;
        (from + (target - from) * eased).round() as u64
    }

    /// True once sampling would return the target regardless of `now`.
    #[must_use]
    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// Drives successive [`CountAnimation`]s toward a moving target.
///
/// Retargeting starts the next transition from wherever the display
/// currently sits, so an update landing mid-flight never snaps.
#[derive(Debug, Default)]
pub struct Animator {
    current: Option<CountAnimation>,
    settled: u64,
}

impl Animator {
    /// Animator resting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steer toward a new target. Equal targets are ignored so repeated
    /// identical updates do not restart the ease.
    pub fn retarget(&mut self, target: u64, now: Instant) {
        if target == self.target() {
            return;
        }
        let from = self.displayed(now);
        self.current = Some(CountAnimation::new(from, target, now));
    }

    /// Value currently shown. Settles the animation once it completes.
    pub fn displayed(&mut self, now: Instant) -> u64 {
        if let Some(animation) = self.current {
            if animation.is_done(now) {
                self.settled = animation.target();
                self.current = None;
                return self.settled;
            }
            return animation.sample(now);
        }
        self.settled
    }

    /// Final value of the transition in flight, or the settled value.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.current.map_or(self.settled, |a| a.target())
    }

    /// Restart the ease from an explicit starting value, regardless of
    /// where the display currently sits.
    pub fn restart(&mut self, from: u64, target: u64, now: Instant) {
        self.settled = from;
        self.current = Some(CountAnimation::new(from, target, now));
    }

    /// Drop any in-flight transition, pinning the display at its target.
    pub fn cancel(&mut self) {
        if let Some(animation) = self.current.take() {
            self.settled = animation.target();
        }
    }
}
