//! Window tracking and quota counting for the fixed-window gate
//!
//! Both types here are pure state holders: they are only ever touched while
//! the gate's lock is held, so neither needs any atomicity of its own.

use std::time::Duration;
use tokio::time::Instant;

/// Owns the current window's start time and decides when it has elapsed.
#[derive(Debug)]
pub(crate) struct WindowTracker {
    started_at: Instant,
    window: Duration,
}

impl WindowTracker {
    pub(crate) fn new(window: Duration, now: Instant) -> Self {
        WindowTracker {
            started_at: now,
            window,
        }
    }

    /// Whether a full window has passed since the current window began.
    pub(crate) fn has_elapsed(&self, now: Instant) -> bool {
        now.duration_since(self.started_at) >= self.window
    }

    /// Start a new window at `now`.
    ///
    /// The start time only moves forward: `rollover` is called with a `now`
    /// observed under the gate's lock after `has_elapsed` returned true.
    pub(crate) fn rollover(&mut self, now: Instant) {
        self.started_at = now;
    }
}

/// Counts admissions granted within the active window.
#[derive(Debug, Default)]
pub(crate) struct QuotaCounter {
    count: u64,
}

impl QuotaCounter {
    /// Take one slot and return the post-increment count.
    ///
    /// The caller compares the returned value against the limit; a value
    /// above the limit means the reservation did not fit in this window.
    pub(crate) fn reserve(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    /// Reset the count for a fresh window.
    pub(crate) fn reset(&mut self) {
        self.count = 0;
    }
}
