//! Time source and generation-keyed deadline timers.
//!
//! # Responsibility
//! - Abstract "now" so timer-driven transitions are testable.
//! - Provide single-slot cancellable deadlines.
//!
//! # Invariants
//! - At most one deadline per timer is live at a time.
//! - Arming or cancelling bumps the generation; a token from an older
//!   generation can never fire.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-process monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock.
///
/// Clones share the same offset, so a test can keep one handle and hand
/// another to the controller.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset_ms: Arc<AtomicU64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// Identifies one arming of a [`DeadlineTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    generation: u64,
}

/// Single-slot cancellable deadline.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    generation: u64,
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer, replacing any live deadline.
    pub fn arm(&mut self, deadline: Instant) -> TimerToken {
        self.generation += 1;
        self.deadline = Some(deadline);
        TimerToken {
            generation: self.generation,
        }
    }

    /// Cancels the live deadline. Returns whether one was live.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires the live deadline if it has elapsed at `now`.
    ///
    /// Returns the token that fired; the timer is disarmed afterwards.
    pub fn fire_due(&mut self, now: Instant) -> Option<TimerToken> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        Some(TimerToken {
            generation: self.generation,
        })
    }
}
