//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for critline value construction.
#[derive(Debug, Error, PartialEq)]
pub enum CritlineError {
    #[error("precision must be between 1 and {max} decimal digits, got {got}")]
    InvalidPrecision { got: u32, max: u32 },

    #[error("unknown scan mode: {0}")]
    UnknownScanMode(String),
}
