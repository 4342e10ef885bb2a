//! Exact Euler–Maclaurin coefficients `B_{2k} / (2k)!`.

use std::sync::{Arc, Mutex, OnceLock};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Coefficients computed so far, shared by every evaluation in the process.
///
/// Only ever grows; a request for fewer terms than are cached is served from
/// the existing prefix.
static COEFFICIENTS: OnceLock<Mutex<Arc<Vec<BigRational>>>> = OnceLock::new();

/// Bernoulli numbers `B_0 ..= B_max` from the recurrence
/// `sum_{j=0}^{m} C(m+1, j) B_j = 0`.
pub fn bernoulli_numbers(max: usize) -> Vec<BigRational> {
    let mut b: Vec<BigRational> = Vec::with_capacity(max + 1);
    b.push(BigRational::one());
    for m in 1..=max {
        if m > 1 && m % 2 == 1 {
            b.push(BigRational::zero());
            continue;
        }
        let mut acc = BigRational::zero();
        let mut binom = BigInt::one();
        for (j, bj) in b.iter().enumerate() {
            if !bj.is_zero() {
                acc += bj * BigRational::from_integer(binom.clone());
            }
            // C(m+1, j+1) = C(m+1, j) · (m+1-j) / (j+1)
            binom = binom * BigInt::from(m + 1 - j) / BigInt::from(j + 1);
        }
        b.push(-acc / BigRational::from_integer(BigInt::from(m + 1)));
    }
    b
}

/// `c_k = B_{2k} / (2k)!` for `k = 1 ..= terms`; index 0 holds `c_1`.
pub fn euler_maclaurin_coefficients(terms: usize) -> Vec<BigRational> {
    let b = bernoulli_numbers(2 * terms);
    let mut factorial = BigInt::one();
    let mut out = Vec::with_capacity(terms);
    for n in 1..=2 * terms {
        factorial *= BigInt::from(n);
        if n % 2 == 0 {
            out.push(&b[n] / BigRational::from_integer(factorial.clone()));
        }
    }
    out
}

/// Cached `c_1 ..= c_n` with `n >= terms`.
///
/// Callers index only the first `terms` entries.
pub fn cached_coefficients(terms: usize) -> Arc<Vec<BigRational>> {
    let cache = COEFFICIENTS.get_or_init(|| Mutex::new(Arc::new(Vec::new())));
    let mut cached = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if cached.len() < terms {
        *cached = Arc::new(euler_maclaurin_coefficients(terms));
    }
    Arc::clone(&cached)
}
