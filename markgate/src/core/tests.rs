use super::window::{QuotaCounter, WindowTracker};
use super::{GateError, RateGate};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, advance, timeout};
use tokio_util::sync::CancellationToken;

#[test]
fn tracker_elapses_only_after_a_full_window() {
    let start = Instant::now();
    let mut tracker = WindowTracker::new(Duration::from_secs(60), start);

    assert!(!tracker.has_elapsed(start));
    assert!(!tracker.has_elapsed(start + Duration::from_secs(59)));
    assert!(tracker.has_elapsed(start + Duration::from_secs(60)));

    tracker.rollover(start + Duration::from_secs(60));
    assert!(!tracker.has_elapsed(start + Duration::from_secs(61)));
    assert!(tracker.has_elapsed(start + Duration::from_secs(120)));
}

#[test]
fn counter_returns_post_increment_values() {
    let mut counter = QuotaCounter::default();

    assert_eq!(counter.reserve(), 1);
    assert_eq!(counter.reserve(), 2);
    counter.reset();
    assert_eq!(counter.reserve(), 1);
}

#[test]
fn negative_limit_is_rejected() {
    let result = RateGate::new(Duration::from_secs(60), -1);
    assert_eq!(result.unwrap_err(), GateError::InvalidLimit(-1));
}

#[test]
fn zero_window_is_rejected() {
    let result = RateGate::new(Duration::ZERO, 10);
    assert_eq!(result.unwrap_err(), GateError::InvalidWindow);
}

#[tokio::test(start_paused = true)]
async fn admits_up_to_limit_without_blocking() {
    let gate = RateGate::new(Duration::from_secs(60), 5).unwrap();

    let began = Instant::now();
    for i in 0..5 {
        gate.admit().await.unwrap_or_else(|e| panic!("admit {} failed: {e}", i + 1));
    }

    // No virtual time passed, so none of the calls waited
    assert_eq!(began.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn call_past_the_limit_waits_one_window() {
    let gate = RateGate::new(Duration::from_secs(1), 5).unwrap();

    let began = Instant::now();
    for _ in 0..5 {
        gate.admit().await.unwrap();
    }
    assert_eq!(began.elapsed(), Duration::ZERO);

    // The sixth call only completes once the window has rolled over
    gate.admit().await.unwrap();
    assert!(began.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn rollover_resets_the_counter() {
    let gate = RateGate::new(Duration::from_secs(60), 3).unwrap();

    for _ in 0..3 {
        gate.admit().await.unwrap();
    }

    advance(Duration::from_secs(60)).await;

    // Fresh window: full quota available again without waiting
    let began = Instant::now();
    for _ in 0..3 {
        gate.admit().await.unwrap();
    }
    assert_eq!(began.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn zero_limit_blocks_every_call() {
    let gate = RateGate::new(Duration::from_secs(60), 0).unwrap();

    let result = timeout(Duration::from_secs(600), gate.admit()).await;
    assert!(result.is_err(), "admit with limit 0 must never complete");
}

#[tokio::test(start_paused = true)]
async fn hundred_sequential_calls_within_one_minute_window() {
    let gate = RateGate::new(Duration::from_secs(60), 100).unwrap();

    let began = Instant::now();
    for _ in 0..100 {
        gate.admit().await.unwrap();
    }
    assert_eq!(began.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn cancelled_waiter_returns_cancelled() {
    let gate = Arc::new(RateGate::new(Duration::from_secs(60), 1).unwrap());
    gate.admit().await.unwrap();

    let cancel = CancellationToken::new();
    let waiter = tokio::spawn({
        let gate = gate.clone();
        let cancel = cancel.clone();
        async move { gate.admit_with_cancel(&cancel).await }
    });

    // Let the waiter reach its sleep before cancelling
    tokio::task::yield_now().await;
    cancel.cancel();

    assert_eq!(waiter.await.unwrap(), Err(GateError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn cancellation_leaves_other_waiters_unaffected() {
    let gate = Arc::new(RateGate::new(Duration::from_secs(1), 1).unwrap());
    gate.admit().await.unwrap();

    let cancel = CancellationToken::new();
    let cancelled = tokio::spawn({
        let gate = gate.clone();
        let cancel = cancel.clone();
        async move { gate.admit_with_cancel(&cancel).await }
    });
    let surviving = tokio::spawn({
        let gate = gate.clone();
        async move {
            gate.admit().await.unwrap();
            Instant::now()
        }
    });

    tokio::task::yield_now().await;
    let began = Instant::now();
    cancel.cancel();

    assert_eq!(cancelled.await.unwrap(), Err(GateError::Cancelled));

    // The surviving waiter still gets the next window's slot
    let admitted_at = surviving.await.unwrap();
    assert!(admitted_at.duration_since(began) >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn burst_of_twenty_drains_across_two_windows() {
    let gate = Arc::new(RateGate::new(Duration::from_secs(1), 10).unwrap());

    let began = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..20 {
        let gate = gate.clone();
        handles.push(tokio::spawn(async move {
            gate.admit().await.unwrap();
            Instant::now()
        }));
    }

    let mut immediate = 0;
    let mut delayed = 0;
    for handle in handles {
        let admitted_at = handle.await.unwrap();
        if admitted_at == began {
            immediate += 1;
        } else {
            assert!(admitted_at.duration_since(began) >= Duration::from_secs(1));
            delayed += 1;
        }
    }

    // Exactly the quota goes through at t=0, the rest after the rollover
    assert_eq!(immediate, 10);
    assert_eq!(delayed, 10);
}

#[tokio::test(start_paused = true)]
async fn quota_is_shared_across_callers() {
    let gate = Arc::new(RateGate::new(Duration::from_secs(60), 4).unwrap());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let gate = gate.clone();
        handles.push(tokio::spawn(async move { gate.admit().await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // The window is now exhausted for everyone, including a new caller
    let blocked = timeout(Duration::from_secs(30), gate.admit()).await;
    assert!(blocked.is_err());
}
