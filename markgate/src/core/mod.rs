//! Core components of the markgate admission library
//!
//! This module contains the building blocks of the gate:
//! - [`gate`]: the blocking admission gate itself
//! - [`window`]: window tracking and quota counting state holders

pub mod gate;
pub mod window;
#[cfg(test)]
mod tests;

pub use gate::RateGate;

use thiserror::Error;

/// Errors produced by the admission gate
///
/// Construction rejects invalid configuration; [`Cancelled`](GateError::Cancelled)
/// is the only error a successful construction can later produce, and only
/// through [`RateGate::admit_with_cancel`](gate::RateGate::admit_with_cancel).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The admission limit was negative
    #[error("invalid admission limit: {0}")]
    InvalidLimit(i64),

    /// The window duration was zero
    #[error("window duration must be positive")]
    InvalidWindow,

    /// The wait for an admission slot was cancelled before a slot was granted
    #[error("admission wait cancelled")]
    Cancelled,
}
