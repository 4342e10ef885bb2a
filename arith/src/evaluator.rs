//! The evaluator seam between the oracle and the arithmetic backend.

use num_complex::Complex64;

use critline_types::Precision;

use crate::gram::riemann_siegel_theta;
use crate::{zeta, ArithError};

/// Trait for anything that can evaluate the Riemann zeta function.
///
/// Precision is a per-call argument; implementations must not keep shared
/// mutable precision state, so a single evaluator can serve parallel callers.
pub trait ZetaEvaluator: Send + Sync {
    /// `zeta(s)` at the requested precision.
    fn zeta(&self, s: Complex64, precision: Precision) -> Result<Complex64, ArithError>;

    /// `zeta(0.5 + i·t)`.
    fn on_critical_line(&self, t: f64, precision: Precision) -> Result<Complex64, ArithError> {
        self.zeta(Complex64::new(0.5, t), precision)
    }

    /// Hardy's `Z(t) = e^{i·theta(t)} · zeta(0.5 + i·t)`, real for real `t`.
    ///
    /// Its sign changes mark zeros on the critical line.
    fn hardy_z(&self, t: f64, precision: Precision) -> Result<f64, ArithError> {
        let zeta = self.on_critical_line(t, precision)?;
        Ok((Complex64::from_polar(1.0, riemann_siegel_theta(t)) * zeta).re)
    }

    /// Human-readable name of this evaluator.
    fn name(&self) -> &str;
}

/// Arbitrary-precision Euler–Maclaurin evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct EulerMaclaurin;

impl ZetaEvaluator for EulerMaclaurin {
    fn zeta(&self, s: Complex64, precision: Precision) -> Result<Complex64, ArithError> {
        zeta(s, precision)
    }

    fn name(&self) -> &str {
        "euler-maclaurin"
    }
}

impl<E: ZetaEvaluator + ?Sized> ZetaEvaluator for &E {
    fn zeta(&self, s: Complex64, precision: Precision) -> Result<Complex64, ArithError> {
        (**self).zeta(s, precision)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
