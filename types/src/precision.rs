//! Working precision for arbitrary-precision evaluation.
//!
//! Precision is always passed explicitly to the evaluator. There is no
//! process-wide precision setting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_PRECISION_DIGITS, MAX_PRECISION_DIGITS};
use crate::CritlineError;

/// Number of decimal digits carried through an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    pub fn new(digits: u32) -> Result<Self, CritlineError> {
        if digits == 0 || digits > MAX_PRECISION_DIGITS {
            return Err(CritlineError::InvalidPrecision {
                got: digits,
                max: MAX_PRECISION_DIGITS,
            });
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> u32 {
        self.0
    }

    /// Binary digits needed to represent `digits` decimal digits.
    pub fn bits(&self) -> u32 {
        (self.0 as f64 * std::f64::consts::LOG2_10).ceil() as u32
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION_DIGITS)
    }
}

impl TryFrom<u32> for Precision {
    type Error = CritlineError;

    fn try_from(digits: u32) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> u32 {
        p.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fifty_digits() {
        assert_eq!(Precision::default().digits(), 50);
    }

    #[test]
    fn rejects_zero_and_oversized() {
        assert!(Precision::new(0).is_err());
        assert!(Precision::new(MAX_PRECISION_DIGITS + 1).is_err());
        assert!(Precision::new(MAX_PRECISION_DIGITS).is_ok());
    }

    #[test]
    fn bits_cover_decimal_digits() {
        // 50 decimal digits need 167 bits.
        assert_eq!(Precision::new(50).unwrap().bits(), 167);
        assert_eq!(Precision::new(1).unwrap().bits(), 4);
    }
}
