//! Fixed behavioural constants of the oracle.
//!
//! The fracture threshold and the classification epsilon are part of the
//! oracle's contract. They are not derived from any statistical argument and
//! must not be tuned.

/// The golden ratio, `(1 + sqrt 5) / 2`.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Growth factor paired with the golden ratio in the fracture threshold.
pub const GROWTH_FACTOR: f64 = 2.07;

/// Deviation count a scan may reach before it halts (≈ 3.349).
///
/// A scan stops as soon as its deviation count strictly exceeds this value,
/// which happens on the fourth deviation.
pub const FRACTURE_THRESHOLD: f64 = GOLDEN_RATIO * GROWTH_FACTOR;

/// Magnitude below which `|zeta|` is treated as zero.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Default working precision in decimal digits.
pub const DEFAULT_PRECISION_DIGITS: u32 = 50;

/// Upper bound accepted for working precision.
pub const MAX_PRECISION_DIGITS: u32 = 10_000;

/// Default spacing between scan points.
pub const DEFAULT_STEP: f64 = 1.0;

/// Default number of scan points.
pub const DEFAULT_SCAN_COUNT: usize = 1000;

/// Default number of known zeros re-evaluated by sample validation.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Number of failing samples echoed in reports.
pub const MAX_REPORTED_FAILURES: usize = 5;

/// Agreement required between a candidate zero and its refined location.
pub const CANDIDATE_TOLERANCE: f64 = 1e-6;

/// Whether `deviations` has crossed the fracture threshold.
pub fn is_fractured(deviations: usize) -> bool {
    deviations as f64 > FRACTURE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_sits_between_three_and_four() {
        assert!((FRACTURE_THRESHOLD - 3.349).abs() < 1e-3);
        assert!(!is_fractured(3));
        assert!(is_fractured(4));
    }

    #[test]
    fn golden_ratio_matches_closed_form() {
        assert!((GOLDEN_RATIO - (1.0 + 5f64.sqrt()) / 2.0).abs() < 1e-15);
    }
}
