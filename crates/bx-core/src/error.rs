//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `BxError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::{CounterId, CustomerId, MAX_COUNTERS};

/// The top-level error type for `bx-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum BxError {
    #[error("counter count {0} is outside 1..={MAX_COUNTERS}")]
    CounterCount(usize),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} not found")]
    CustomerNotFound(CustomerId),

    #[error("{0} not found")]
    CounterNotFound(CounterId),
}

/// Shorthand result type for all `bx-*` crates.
pub type BxResult<T> = Result<T, BxError>;
