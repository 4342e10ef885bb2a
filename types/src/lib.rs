//! Fundamental types for critline.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the verified zero set, scan records and modes, working precision, and the
//! fixed behavioural constants of the oracle.

pub mod constants;
pub mod error;
pub mod precision;
pub mod scan;
pub mod zeros;

pub use constants::*;
pub use error::CritlineError;
pub use precision::Precision;
pub use scan::{Deviation, ProbePoint, ScanMode, ScanOutcome, Termination};
pub use zeros::VerifiedSet;
