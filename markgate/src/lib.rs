//! # Markgate
//!
//! A fixed-window admission gate for throttling concurrent calls to a shared
//! resource.
//!
//! ## Overview
//!
//! Markgate implements fixed-window rate limiting as a blocking gate rather
//! than an accept/reject check: callers that exceed the window's quota are
//! suspended until the window rolls over, then retried. This fits the common
//! "N calls per minute against a remote API" contract where the caller wants
//! the operation performed eventually, not refused.
//!
//! - **Blocking contract**: `admit` never refuses; with a limit of at least 1
//!   it always eventually succeeds (absent cancellation)
//! - **One serialized decision point**: all callers of a gate share one lock,
//!   so rollover and counting decisions cannot race
//! - **Wake on timeout**: blocked callers sleep roughly one window and
//!   re-validate on their own wake-up; no cross-task notification is needed
//! - **Cancellable waits**: a blocked caller can be cancelled without
//!   disturbing the quota observed by its peers
//!
//! ## Quick Start
//!
//! ```
//! use markgate::RateGate;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), markgate::GateError> {
//! // At most 100 admissions per minute, shared by all callers
//! let gate = RateGate::new(Duration::from_secs(60), 100)?;
//!
//! gate.admit().await?;
//! // perform the throttled call
//! # Ok(())
//! # }
//! ```
//!
//! ## Fixed-window semantics
//!
//! The window resets at discrete boundaries. A burst may legally use up to
//! `limit` admissions right before a rollover and `limit` more right after
//! it. That imprecision is the accepted tradeoff of fixed-window limiting;
//! use a sliding-window limiter if boundary precision matters.
//!
//! ## Concurrency
//!
//! [`RateGate`] is `Sync`: share one instance per throttled resource behind
//! an `Arc` and call [`RateGate::admit`] from any number of tasks. No
//! ordering is promised between waiting callers.

pub mod core;

pub use core::{GateError, RateGate};
