//! Arbitrary-precision arithmetic for zeta evaluation.
//!
//! Numbers are binary fixed-point: a [`num_bigint::BigInt`] mantissa scaled by
//! `2^bits`, where `bits` is chosen per evaluation from the requested decimal
//! [`Precision`](critline_types::Precision). Every function takes its working
//! precision explicitly, so evaluations share nothing mutable beyond a grow-only
//! coefficient cache and can run on any thread.
//!
//! - [`fixed`]: the fixed-point context, real and complex values, elementary functions.
//! - [`bernoulli`]: exact Euler–Maclaurin coefficients.
//! - [`zeta`]: Riemann zeta at an arbitrary complex point.
//! - [`gram`]: Riemann–Siegel theta and Gram points for locating zeros by index.
//! - [`evaluator`]: the [`ZetaEvaluator`] trait the oracle is generic over.

pub mod bernoulli;
pub mod error;
pub mod evaluator;
pub mod fixed;
pub mod gram;
pub mod zeta;

pub use error::ArithError;
pub use evaluator::{EulerMaclaurin, ZetaEvaluator};
pub use fixed::{CFixed, Fixed, FixedContext};
pub use gram::{gram_point, riemann_siegel_theta};
pub use zeta::{working_bits, zeta, GUARD_BITS, MAX_SUMMATION_LENGTH};
