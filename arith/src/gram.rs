//! Riemann–Siegel theta and Gram points.
//!
//! `theta(t)` is the phase that makes `Z(t) = e^{i·theta(t)} · zeta(0.5 + i·t)`
//! real. Gram points `g_k` solve `theta(g_k) = k·π`; they bracket the zeros
//! closely enough to locate the n-th zero by counting sign changes of `Z`.
//! Double precision is sufficient here: these values only place brackets,
//! the zeros themselves are refined with the full-precision evaluator.

use std::f64::consts::PI;

use crate::ArithError;

/// Ordinate of the minimum of `theta`; Gram points are taken above it.
const THETA_MINIMUM: f64 = 6.289_835_988_981_78;

const MAX_NEWTON_STEPS: usize = 100;

/// `theta(t)` from its asymptotic expansion, accurate to about `1e-12` for `t ≥ 7`.
pub fn riemann_siegel_theta(t: f64) -> f64 {
    let r = 1.0 / t;
    let r2 = r * r;
    let series = r * (1.0 / 48.0 + r2 * (7.0 / 5760.0 + r2 * (31.0 / 80640.0 + r2 * 127.0 / 430_080.0)));
    t / 2.0 * (t / (2.0 * PI)).ln() - t / 2.0 - PI / 8.0 + series
}

/// `theta'(t)`, leading terms.
fn theta_slope(t: f64) -> f64 {
    0.5 * (t / (2.0 * PI)).ln() - 1.0 / (48.0 * t * t)
}

/// The Gram point `g_k`, defined for `k ≥ -1`.
pub fn gram_point(k: i64) -> Result<f64, ArithError> {
    if k < -1 {
        return Err(ArithError::Domain("gram point"));
    }
    let target = k as f64 * PI;
    // theta is convex above its minimum, so Newton from the right descends monotonically.
    let mut t = 2.0 * PI * ((k + 2) as f64).max(20.0);
    for _ in 0..MAX_NEWTON_STEPS {
        let step = (riemann_siegel_theta(t) - target) / theta_slope(t);
        t = (t - step).max(THETA_MINIMUM);
        if step.abs() <= 1e-13 * t {
            return Ok(t);
        }
    }
    Err(ArithError::Overflow(format!("gram point {k} did not converge")))
}
