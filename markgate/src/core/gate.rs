//! The fixed-window admission gate
//!
//! This module provides [`RateGate`], the blocking gate that concurrent
//! callers share to stay within a configured calls-per-window quota.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::GateError;
use super::window::{QuotaCounter, WindowTracker};

/// A fixed-window admission gate shared by concurrent callers
///
/// One `RateGate` is constructed per throttled resource and lives for the
/// process's duration. All callers of the same gate serialize through one
/// exclusive lock, so at most one admission decision is evaluated at a time.
///
/// # Blocking contract
///
/// [`admit`](RateGate::admit) never refuses a request. When the current
/// window's quota is exhausted the caller is suspended for roughly one
/// window, then re-evaluated; a burst past the limit drains one window
/// rollover at a time. With a limit of 0 every call blocks forever.
///
/// # Example
///
/// ```
/// use markgate::RateGate;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), markgate::GateError> {
/// let gate = Arc::new(RateGate::new(Duration::from_secs(1), 10)?);
///
/// let mut handles = Vec::new();
/// for _ in 0..4 {
///     let gate = gate.clone();
///     handles.push(tokio::spawn(async move { gate.admit().await }));
/// }
/// for handle in handles {
///     handle.await.unwrap()?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RateGate {
    window: Duration,
    limit: u64,
    state: Mutex<GateState>,
}

/// Mutable gate state, guarded by the gate's one exclusive lock.
#[derive(Debug)]
struct GateState {
    tracker: WindowTracker,
    counter: QuotaCounter,
}

impl RateGate {
    /// Create a gate admitting at most `limit` calls per `window`.
    ///
    /// A `limit` of 0 is a valid configuration in which every call to
    /// [`admit`](RateGate::admit) blocks forever.
    ///
    /// # Errors
    ///
    /// - [`GateError::InvalidLimit`] if `limit` is negative
    /// - [`GateError::InvalidWindow`] if `window` is zero
    pub fn new(window: Duration, limit: i64) -> Result<Self, GateError> {
        if limit < 0 {
            return Err(GateError::InvalidLimit(limit));
        }
        if window.is_zero() {
            return Err(GateError::InvalidWindow);
        }

        Ok(RateGate {
            window,
            limit: limit as u64,
            state: Mutex::new(GateState {
                tracker: WindowTracker::new(window, Instant::now()),
                counter: QuotaCounter::default(),
            }),
        })
    }

    /// The configured maximum admissions per window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The configured window duration.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait until an admission slot is available, then take it.
    ///
    /// Returns as soon as the current window has quota left; otherwise the
    /// caller is suspended until capacity is expected to exist and retried.
    /// Given a limit of at least 1 this always eventually succeeds.
    pub async fn admit(&self) -> Result<(), GateError> {
        self.admit_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`admit`](RateGate::admit), but the wait can be interrupted.
    ///
    /// If `cancel` fires while the caller is suspended, the call fails with
    /// [`GateError::Cancelled`] and no admission is granted. Cancelling one
    /// waiter does not change what other callers of the gate are granted.
    pub async fn admit_with_cancel(&self, cancel: &CancellationToken) -> Result<(), GateError> {
        loop {
            {
                let mut state = self.state.lock();
                let now = Instant::now();

                if state.tracker.has_elapsed(now) {
                    trace!("window elapsed, rolling over");
                    state.tracker.rollover(now);
                    state.counter.reset();
                }

                if state.counter.reserve() <= self.limit {
                    return Ok(());
                }
            }

            // Quota exhausted. Sleep with the lock released: each waiter
            // re-validates the window on its own wake-up, and a sleeper that
            // kept the lock would stall every other caller.
            trace!(window = ?self.window, "admission quota exhausted, waiting for rollover");
            tokio::select! {
                _ = cancel.cancelled() => return Err(GateError::Cancelled),
                _ = sleep(self.window) => {}
            }
        }
    }
}
