//! Locating the n-th zero on the critical line.
//!
//! Zeros are counted from the Gram points around index `n`. At a good Gram
//! point `g_k` (one where `(-1)^k · Z(g_k) > 0`) exactly `k + 1` zeros lie
//! below it (Rosser's rule, which holds far beyond any height evaluated here).
//! Between the nearest good Gram points below and above the target, sign changes
//! of `Z` are counted on a grid that is refined until it finds every zero the
//! two endpoints account for. The sign change for zero `n` is then narrowed by
//! bisection and finished with [`refine_zero`].

use critline_arith::{gram_point, ZetaEvaluator};
use critline_types::Precision;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::refine::{refine_zero, RefinedZero};
use crate::OracleError;

/// How far past `n` to look for a good Gram point before giving up.
const MAX_GRAM_SEARCH: i64 = 64;

/// Initial and maximum grid points per Gram interval.
const INITIAL_SUBDIVISIONS: usize = 4;
const MAX_SUBDIVISIONS: usize = 256;

/// Bisection steps applied to a sign-change bracket before refinement.
const BISECTION_STEPS: usize = 12;

/// The `n`-th zero (1-based) of `zeta` on the critical line, ordered by height.
pub fn zero_by_index<E: ZetaEvaluator + ?Sized>(
    evaluator: &E,
    n: u64,
    precision: Precision,
) -> Result<RefinedZero, OracleError> {
    if n == 0 {
        return Err(OracleError::InvalidParameter("zero index must be at least 1".into()));
    }
    let fail = |reason: String| OracleError::ZeroNotLocated { index: n, reason };
    let n_i = i64::try_from(n).map_err(|_| fail(format!("index {n} out of range")))?;
    let z = |t: f64| evaluator.hardy_z(t, precision);

    // Lower anchor: a good Gram point at or below g_{n-2}; g_{-1} always has no zeros below it.
    let mut lo = n_i - 2;
    while lo > -1 && !is_good(lo, z(gram_point(lo)?)?) {
        lo -= 1;
    }
    // Upper anchor: a good Gram point at or above g_{n-1}.
    let mut hi = n_i - 1;
    while !is_good(hi, z(gram_point(hi)?)?) {
        hi += 1;
        if hi - n_i > MAX_GRAM_SEARCH {
            return Err(fail(format!("no good Gram point within {MAX_GRAM_SEARCH} of index {n}")));
        }
    }
    let expected = (hi - lo) as usize;
    let gram: Vec<f64> = (lo..=hi).map(gram_point).collect::<Result<_, _>>()?;
    debug!(n, lo, hi, expected, "counting zeros between Gram points");

    let mut subdivisions = INITIAL_SUBDIVISIONS;
    let brackets = loop {
        let grid = grid_points(&gram, subdivisions);
        let values = grid
            .par_iter()
            .map(|&t| z(t))
            .collect::<Result<Vec<f64>, _>>()?;
        let brackets = sign_changes(&grid, &values);
        trace!(subdivisions, found = brackets.len(), expected, "sign changes");
        if brackets.len() == expected {
            break brackets;
        }
        if brackets.len() > expected {
            return Err(fail(format!(
                "found {} sign changes between g_{lo} and g_{hi}, expected {expected}",
                brackets.len()
            )));
        }
        subdivisions *= 2;
        if subdivisions > MAX_SUBDIVISIONS {
            return Err(fail(format!(
                "could not separate {expected} zeros between g_{lo} and g_{hi}"
            )));
        }
    };

    // Zeros above g_lo are numbered from lo + 2.
    let (mut a, mut b, mut za) = brackets[(n_i - lo - 2) as usize];
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (a + b);
        let zm = z(mid)?;
        if zm == 0.0 {
            a = mid;
            b = mid;
            break;
        }
        if (zm < 0.0) == (za < 0.0) {
            a = mid;
            za = zm;
        } else {
            b = mid;
        }
    }

    let zero = refine_zero(evaluator, 0.5 * (a + b), precision)?;
    let slack = (b - a).max(1e-9);
    if zero.t < a - slack || zero.t > b + slack {
        return Err(fail(format!(
            "refinement left the bracket [{a}, {b}] for t = {}",
            zero.t
        )));
    }
    Ok(zero)
}

/// Whether `g_k` is a good Gram point given `Z(g_k)`.
fn is_good(k: i64, z: f64) -> bool {
    if k.rem_euclid(2) == 0 {
        z > 0.0
    } else {
        z < 0.0
    }
}

/// Every Gram point plus `subdivisions - 1` evenly spaced points inside each interval.
fn grid_points(gram: &[f64], subdivisions: usize) -> Vec<f64> {
    let mut grid = Vec::with_capacity((gram.len() - 1) * subdivisions + 1);
    for pair in gram.windows(2) {
        let width = (pair[1] - pair[0]) / subdivisions as f64;
        grid.extend((0..subdivisions).map(|i| pair[0] + i as f64 * width));
    }
    if let Some(&last) = gram.last() {
        grid.push(last);
    }
    grid
}

/// Brackets `(a, b, Z(a))` where `Z` changes sign, in increasing order.
///
/// A grid value of exactly zero closes the bracket on its left neighbour.
fn sign_changes(grid: &[f64], values: &[f64]) -> Vec<(f64, f64, f64)> {
    let mut brackets = Vec::new();
    let mut prev: Option<(f64, f64)> = None;
    for (&t, &v) in grid.iter().zip(values) {
        if v == 0.0 {
            if let Some((pt, pv)) = prev {
                brackets.push((pt, t, pv));
            }
            prev = None;
            continue;
        }
        if let Some((pt, pv)) = prev {
            if (pv < 0.0) != (v < 0.0) {
                brackets.push((pt, t, pv));
            }
        }
        prev = Some((t, v));
    }
    brackets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gram_point_parity() {
        assert!(is_good(-1, -0.3));
        assert!(!is_good(-1, 0.3));
        assert!(is_good(0, 1.0));
        assert!(is_good(7, -2.0));
        assert!(!is_good(8, -2.0));
    }

    #[test]
    fn grid_includes_every_gram_point() {
        let grid = grid_points(&[10.0, 12.0, 16.0], 2);
        assert_eq!(grid, vec![10.0, 11.0, 12.0, 14.0, 16.0]);
    }

    #[test]
    fn sign_changes_are_bracketed_in_order() {
        let grid = [0.0, 1.0, 2.0, 3.0, 4.0];
        let values = [-1.0, 2.0, 3.0, -0.5, -0.1];
        assert_eq!(
            sign_changes(&grid, &values),
            vec![(0.0, 1.0, -1.0), (2.0, 3.0, 3.0)]
        );
    }
}
