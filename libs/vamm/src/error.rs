//! Error types for the pricing core
//!
//! Every failure is fatal to the call that produced it. Nothing in the core
//! is retryable: the inputs are a snapshot, and the same snapshot fails the
//! same way every time.

use thiserror::Error;

/// Errors produced by vAMM arithmetic and simulation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VammError {
    /// A swap was requested with a negative amount
    #[error("Invalid argument: swap amount {amount} must be non-negative")]
    NegativeSwapAmount { amount: i128 },

    /// Checked arithmetic exceeded the representable range
    #[error("Overflow in {0}")]
    Overflow(&'static str),

    /// Checked arithmetic went below the representable range
    #[error("Underflow in {0}")]
    Underflow(&'static str),

    /// A zero reserve, peg, price or scale reached a division step
    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    /// A wide intermediate does not fit the narrower output type
    #[error("Conversion failed: {value} does not fit in {target}")]
    Conversion { value: String, target: &'static str },

    /// Scale configuration rejected at construction
    #[error("Invalid precision: {0}")]
    InvalidPrecision(String),
}

/// Result alias used throughout the crate
pub type VammResult<T> = Result<T, VammError>;
