//! Scan parameters.

use critline_types::{ScanMode, DEFAULT_EPSILON, DEFAULT_SCAN_COUNT, DEFAULT_STEP};

use crate::OracleError;

/// Parameters of one scan over `t_i = start + i·step`, `i = 0..count`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanRequest {
    /// First ordinate; defaults to `max(VerifiedSet) + step`.
    pub start_t: Option<f64>,
    pub count: usize,
    pub epsilon: f64,
    pub step: f64,
    pub mode: ScanMode,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            start_t: None,
            count: DEFAULT_SCAN_COUNT,
            epsilon: DEFAULT_EPSILON,
            step: DEFAULT_STEP,
            mode: ScanMode::Verification,
        }
    }
}

impl ScanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(mut self, t: f64) -> Self {
        self.start_t = Some(t);
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Ordinate of the `i`-th point given the resolved start.
    pub fn point(&self, start: f64, i: usize) -> f64 {
        start + i as f64 * self.step
    }

    pub(crate) fn validate(&self) -> Result<(), OracleError> {
        if !self.step.is_finite() {
            return Err(OracleError::InvalidParameter(format!("step {}", self.step)));
        }
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(OracleError::InvalidParameter(format!("epsilon {}", self.epsilon)));
        }
        if let Some(start) = self.start_t {
            if !start.is_finite() {
                return Err(OracleError::InvalidParameter(format!("start {start}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_constants() {
        let r = ScanRequest::new();
        assert_eq!(r.count, 1000);
        assert_eq!(r.step, 1.0);
        assert_eq!(r.epsilon, 1e-10);
        assert_eq!(r.mode, ScanMode::Verification);
        assert_eq!(r.start_t, None);
    }

    #[test]
    fn points_are_linear_in_index() {
        let r = ScanRequest::new().step(0.5);
        assert_eq!(r.point(10.0, 0), 10.0);
        assert_eq!(r.point(10.0, 3), 11.5);
    }

    #[test]
    fn rejects_non_finite_parameters() {
        assert!(ScanRequest::new().step(f64::NAN).validate().is_err());
        assert!(ScanRequest::new().epsilon(-1.0).validate().is_err());
        assert!(ScanRequest::new().starting_at(f64::INFINITY).validate().is_err());
        assert!(ScanRequest::new().validate().is_ok());
    }
}
