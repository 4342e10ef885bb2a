//! Threshold classification of zeta values.

use num_complex::Complex64;

/// Whether a zeta value is close enough to zero, and how close it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub on_critical_line: bool,
    pub magnitude: f64,
}

/// `|zeta| < epsilon`. A plain threshold test, not a proof of anything.
pub fn classify(zeta: Complex64, epsilon: f64) -> Classification {
    let magnitude = zeta.norm();
    Classification {
        on_critical_line: magnitude < epsilon,
        magnitude,
    }
}
