//! Nullable zeta evaluators.

use critline_arith::{ArithError, ZetaEvaluator};
use critline_types::Precision;
use num_complex::Complex64;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same value for every point.
pub struct NullEvaluator {
    value: Complex64,
    calls: AtomicUsize,
}

impl NullEvaluator {
    pub fn constant(value: Complex64) -> Self {
        Self {
            value,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every point looks like an exact zero.
    pub fn vanishing() -> Self {
        Self::constant(Complex64::new(0.0, 0.0))
    }

    /// Every point is far from zero.
    pub fn nonvanishing() -> Self {
        Self::constant(Complex64::new(1.0, 1.0))
    }

    /// Number of evaluations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ZetaEvaluator for NullEvaluator {
    fn zeta(&self, _s: Complex64, _precision: Precision) -> Result<Complex64, ArithError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "null-evaluator"
    }
}

type Script = dyn Fn(Complex64) -> Complex64 + Send + Sync;

/// Computes each value from a caller-supplied function of `s`.
pub struct ScriptedEvaluator {
    script: Box<Script>,
    calls: AtomicUsize,
}

impl ScriptedEvaluator {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(Complex64) -> Complex64 + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script keyed on the ordinate `t = Im(s)` only.
    pub fn by_ordinate<F>(script: F) -> Self
    where
        F: Fn(f64) -> Complex64 + Send + Sync + 'static,
    {
        Self::new(move |s| script(s.im))
    }

    /// Zeros exactly at the listed ordinates (to within `1e-9`), magnitude one elsewhere.
    pub fn zeros_at(ordinates: Vec<f64>) -> Self {
        Self::by_ordinate(move |t| {
            if ordinates.iter().any(|z| (z - t).abs() < 1e-9) {
                Complex64::new(0.0, 0.0)
            } else {
                Complex64::new(1.0, 0.0)
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ZetaEvaluator for ScriptedEvaluator {
    fn zeta(&self, s: Complex64, _precision: Precision) -> Result<Complex64, ArithError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.script)(s))
    }

    fn name(&self) -> &str {
        "scripted-evaluator"
    }
}
