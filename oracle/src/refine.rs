//! Locating the zero nearest a guessed ordinate.
//!
//! Solves `zeta(0.5 + i·w) = 0` for complex `w` with the secant method. The
//! real part of the root is the ordinate `t`; its imaginary part measures how
//! far the zero sits from the critical line (`sigma = 0.5 - Im w`).

use critline_arith::ZetaEvaluator;
use critline_types::Precision;
use num_complex::Complex64;
use tracing::debug;

use crate::OracleError;

/// Offset of the second secant seed from the guess.
const SEED_OFFSET: f64 = 1e-3;

/// Relative step size at which the iteration is considered converged.
const TOLERANCE: f64 = 1e-12;

const MAX_ITERATIONS: usize = 60;

/// A zero located by [`refine_zero`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefinedZero {
    /// Imaginary part of the zero.
    pub t: f64,
    /// Real part of the zero.
    pub sigma: f64,
    /// `|zeta|` at the returned point.
    pub residual: f64,
    pub iterations: usize,
}

impl RefinedZero {
    /// `|sigma - 0.5|`.
    pub fn off_line_deviation(&self) -> f64 {
        (self.sigma - 0.5).abs()
    }
}

/// Refine `guess` to the nearby zero of `zeta(0.5 + i·w)`.
///
/// Converges when the guess is within roughly half a zero spacing of the root.
pub fn refine_zero<E: ZetaEvaluator + ?Sized>(
    evaluator: &E,
    guess: f64,
    precision: Precision,
) -> Result<RefinedZero, OracleError> {
    if !guess.is_finite() {
        return Err(OracleError::InvalidParameter(format!("guess {guess}")));
    }
    let f = |w: Complex64| evaluator.zeta(Complex64::new(0.5, 0.0) + Complex64::i() * w, precision);
    let fail = |reason: &str| OracleError::RefinementFailed {
        guess,
        reason: reason.to_string(),
    };

    let mut w0 = Complex64::new(guess, 0.0);
    let mut w1 = Complex64::new(guess + SEED_OFFSET, 0.0);
    let mut f0 = f(w0)?;
    let mut f1 = f(w1)?;

    for iteration in 1..=MAX_ITERATIONS {
        if f1.norm() == 0.0 {
            return Ok(located(w1, f1, iteration - 1));
        }
        let slope = f1 - f0;
        if slope.norm() == 0.0 {
            return Err(fail("secant step degenerated"));
        }
        let w2 = w1 - f1 * (w1 - w0) / slope;
        if !w2.re.is_finite() || !w2.im.is_finite() {
            return Err(fail("secant step diverged"));
        }
        let f2 = f(w2)?;
        let converged = (w2 - w1).norm() < TOLERANCE * w2.norm().max(1.0);
        debug!(iteration, t = w2.re, residual = f2.norm(), "secant step");

        w0 = w1;
        f0 = f1;
        w1 = w2;
        f1 = f2;
        if converged {
            return Ok(located(w1, f1, iteration));
        }
    }
    Err(fail("no convergence"))
}

fn located(w: Complex64, value: Complex64, iterations: usize) -> RefinedZero {
    RefinedZero {
        t: w.re,
        sigma: 0.5 - w.im,
        residual: value.norm(),
        iterations,
    }
}
