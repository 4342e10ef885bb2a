//! Riemann zeta by Euler–Maclaurin summation.
//!
//! ```text
//! zeta(s) = sum_{n<N} n^-s + N^(1-s)/(s-1) + N^-s/2
//!         + sum_{k=1}^{M} B_2k/(2k)! · s(s+1)···(s+2k-2) · N^(-s-2k+1)
//! ```
//!
//! With `M = bits/2 + 1` and `2πN ≥ 2(|s| + 2M + 1)` every correction term
//! shrinks by at least a factor of 4, so the tail is below one unit in the
//! last place of the working precision. `N` grows linearly with `|s|`; heights
//! that would need more than [`MAX_SUMMATION_LENGTH`] terms are rejected.

use num_complex::Complex64;
use tracing::trace;

use critline_types::Precision;

use crate::bernoulli::cached_coefficients;
use crate::fixed::{CFixed, FixedContext};
use crate::ArithError;

/// Bits carried beyond the requested precision.
pub const GUARD_BITS: u32 = 32;

/// Largest main-sum length evaluated; roughly `|s| ≤ 6.5e6`.
pub const MAX_SUMMATION_LENGTH: u64 = 1 << 21;

/// Fixed-point scale used to evaluate zeta at `s` to `precision`.
///
/// Large `|s|` loses bits in argument reduction and in the growth of the
/// Pochhammer products, so two bits per binary order of `|s|` are added.
pub fn working_bits(s: Complex64, precision: Precision) -> u32 {
    let size = (s.norm() + 2.0).log2().ceil() as u32;
    precision.bits() + GUARD_BITS + 2 * size
}

/// Evaluate `zeta(s)` at the given decimal precision and round to `Complex64`.
pub fn zeta(s: Complex64, precision: Precision) -> Result<Complex64, ArithError> {
    if !s.re.is_finite() || !s.im.is_finite() {
        return Err(ArithError::NonFiniteInput(s.to_string()));
    }
    if s.re == 1.0 && s.im == 0.0 {
        return Err(ArithError::Pole);
    }

    let bits = working_bits(s, precision);
    let terms = (bits / 2 + 1) as usize;
    let n = summation_length(s, terms)?;
    let ctx = FixedContext::new(bits);
    trace!(%s, bits, terms, n, "evaluating zeta");

    let s_fx = ctx.complex_from(s)?;
    let (mut sum, n_pow) = power_sum(&ctx, &s_fx, n)?;

    // N^(1-s) / (s-1)
    let s_minus_one = &s_fx - &CFixed::new(ctx.one(), Default::default());
    let tail = ctx.cdiv(&n_pow.mul_int(n as i64), &s_minus_one)?;
    sum = sum + &tail;
    sum = sum + &n_pow.halve();

    // u_k = s(s+1)···(s+2k-2) · N^(-s-2k+1)
    let mut u = ctx.cmul(&s_fx, &n_pow).div_int(n);
    let n_squared = n * n;
    let coefficients = cached_coefficients(terms);
    for (k, c) in coefficients.iter().take(terms).enumerate() {
        if u.is_zero() {
            break;
        }
        let coefficient = ctx.from_ratio(c);
        sum = sum + &ctx.scale(&coefficient, &u);

        let k = (k + 1) as i64;
        let a = &s_fx + &CFixed::new(ctx.from_int(2 * k - 1), Default::default());
        let b = &s_fx + &CFixed::new(ctx.from_int(2 * k), Default::default());
        u = ctx.cmul(&u, &ctx.cmul(&a, &b)).div_int(n_squared);
    }

    Ok(ctx.complex_to_c64(&sum))
}

/// `N` with `2πN ≥ 2(|s| + 2M + 1)`, bounded by [`MAX_SUMMATION_LENGTH`].
fn summation_length(s: Complex64, terms: usize) -> Result<u64, ArithError> {
    let reach = s.norm() + 2.0 * terms as f64 + 1.0;
    let n = (reach / std::f64::consts::PI).ceil() + 1.0;
    if n > MAX_SUMMATION_LENGTH as f64 {
        return Err(ArithError::Overflow(format!(
            "|s| = {:.3e} needs {n:.3e} summation terms, limit {MAX_SUMMATION_LENGTH}",
            s.norm()
        )));
    }
    Ok(n as u64)
}

/// `(sum_{n<N} n^-s, N^-s)`.
///
/// Only primes pay for a logarithm, exponential and rotation; a composite `n`
/// reuses `p^-s · (n/p)^-s` for its smallest prime factor `p`. Cofactors never
/// exceed `N/2`, so only that half of the powers is kept.
fn power_sum(ctx: &FixedContext, s: &CFixed, n: u64) -> Result<(CFixed, CFixed), ArithError> {
    let smallest_factor = smallest_prime_factors(n as usize);
    let half = n as usize / 2;
    let mut table: Vec<CFixed> = Vec::with_capacity(half + 1);
    table.push(CFixed::default());

    let mut sum = CFixed::default();
    let mut last = CFixed::default();
    for m in 1..=n as usize {
        let value = nth_inverse_power(ctx, s, m, &smallest_factor, &table)?;
        if m <= half {
            table.push(value.clone());
        }
        if m < n as usize {
            sum = sum + &value;
        } else {
            last = value;
        }
    }
    Ok((sum, last))
}

fn nth_inverse_power(
    ctx: &FixedContext,
    s: &CFixed,
    m: usize,
    smallest_factor: &[u32],
    table: &[CFixed],
) -> Result<CFixed, ArithError> {
    if m == 1 {
        return Ok(CFixed::new(ctx.one(), Default::default()));
    }
    let p = smallest_factor[m] as usize;
    if p != m {
        return Ok(ctx.cmul(&table[p], &table[m / p]));
    }
    // m^-s = m^-σ · (cos(t ln m) - i sin(t ln m))
    let ln = ctx.ln_u64(m as u64)?;
    let magnitude = ctx.exp(&-ctx.mul(&s.re, &ln))?;
    let (sin, cos) = ctx.sin_cos(&ctx.mul(&s.im, &ln));
    Ok(CFixed::new(ctx.mul(&magnitude, &cos), -ctx.mul(&magnitude, &sin)))
}

/// Smallest prime factor of every index up to `max` (0 and 1 map to 0).
fn smallest_prime_factors(max: usize) -> Vec<u32> {
    let len = max + 1;
    let mut factors = vec![0u32; len];
    for i in 2..len {
        if factors[i] != 0 {
            continue;
        }
        let mut j = i;
        while j < len {
            if factors[j] == 0 {
                factors[j] = i as u32;
            }
            j += i;
        }
    }
    factors
}
