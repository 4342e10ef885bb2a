//! Scan behaviour: modes, determinism and the fracture circuit breaker.

mod common;

use common::FIRST_ZEROS;
use critline_arith::EulerMaclaurin;
use critline_nullables::{NullEvaluator, ScriptedEvaluator};
use critline_oracle::{ScanRequest, ZeroOracle};
use critline_types::{ScanMode, Termination, VerifiedSet};
use num_complex::Complex64;
use proptest::prelude::*;

fn verified(values: &[f64]) -> VerifiedSet {
    VerifiedSet::from_values(values.iter().copied())
}

#[test]
fn every_point_flagged_halts_after_four() {
    let mut oracle = ZeroOracle::new(verified(&[10.0]), NullEvaluator::nonvanishing());
    let outcome = oracle.scan(&ScanRequest::new().count(100)).expect("scan");

    assert_eq!(outcome.deviations.len(), 4);
    assert_eq!(outcome.termination, Termination::Fractured);
    assert_eq!(outcome.points_checked, 4);
    assert_eq!(oracle.evaluator().calls(), 4);
    assert_eq!(oracle.last_deviations(), outcome.deviations.as_slice());
}

#[test]
fn search_mode_halts_on_four_candidate_zeros() {
    let mut oracle = ZeroOracle::new(verified(&[10.0]), NullEvaluator::vanishing());
    let outcome = oracle
        .scan(&ScanRequest::new().count(100).mode(ScanMode::Search))
        .expect("scan");
    assert_eq!(outcome.deviations.len(), 4);
    assert!(outcome.is_fractured());
}

#[test]
fn three_deviations_complete_the_scan() {
    let evaluator = ScriptedEvaluator::zeros_at(vec![12.0, 15.0, 18.0]);
    let mut oracle = ZeroOracle::new(verified(&[10.0]), evaluator);
    let outcome = oracle
        .scan(&ScanRequest::new().count(20).mode(ScanMode::Search))
        .expect("scan");

    assert_eq!(outcome.termination, Termination::Completed);
    assert_eq!(outcome.points_checked, 20);
    let ts: Vec<f64> = outcome.deviations.iter().map(|d| d.t).collect();
    assert_eq!(ts, vec![12.0, 15.0, 18.0]);
}

#[test]
fn default_start_is_one_step_past_maximum() {
    let evaluator = ScriptedEvaluator::zeros_at(vec![10.5]);
    let mut oracle = ZeroOracle::new(verified(&[3.0, 10.0]), evaluator);
    let outcome = oracle
        .scan(&ScanRequest::new().count(1).step(0.5).mode(ScanMode::Search))
        .expect("scan");
    assert_eq!(outcome.deviations.len(), 1);
    assert_eq!(outcome.deviations[0].t, 10.5);
}

#[test]
fn explicit_start_overrides_default() {
    let evaluator = ScriptedEvaluator::zeros_at(vec![2.0]);
    let mut oracle = ZeroOracle::new(verified(&[100.0]), evaluator);
    let outcome = oracle
        .scan(&ScanRequest::new().starting_at(1.0).count(3).mode(ScanMode::Search))
        .expect("scan");
    assert_eq!(outcome.deviations.len(), 1);
    assert_eq!(outcome.deviations[0].t, 2.0);
}

#[test]
fn deviations_reset_between_scans() {
    let mut oracle = ZeroOracle::new(verified(&[10.0]), NullEvaluator::nonvanishing());
    oracle.scan(&ScanRequest::new().count(2)).expect("first scan");
    assert_eq!(oracle.last_deviations().len(), 2);
    oracle
        .scan(&ScanRequest::new().count(2).mode(ScanMode::Search))
        .expect("second scan");
    assert!(oracle.last_deviations().is_empty());
}

#[test]
fn scan_does_not_touch_verified_set() {
    let set = verified(&[1.0, 2.0, 3.0]);
    let mut oracle = ZeroOracle::new(set.clone(), NullEvaluator::vanishing());
    oracle
        .scan(&ScanRequest::new().count(50).mode(ScanMode::Search))
        .expect("scan");
    assert_eq!(oracle.verified(), &set);
}

#[test]
fn zero_count_completes_empty() {
    let mut oracle = ZeroOracle::new(VerifiedSet::default(), NullEvaluator::nonvanishing());
    let outcome = oracle.scan(&ScanRequest::new().count(0)).expect("scan");
    assert!(outcome.deviations.is_empty());
    assert_eq!(outcome.termination, Termination::Completed);
}

#[test]
fn invalid_step_is_rejected() {
    let mut oracle = ZeroOracle::new(VerifiedSet::default(), NullEvaluator::nonvanishing());
    assert!(oracle.scan(&ScanRequest::new().step(f64::NAN)).is_err());
}

#[test]
fn real_evaluator_finds_first_zero_in_search_mode() {
    let mut oracle = ZeroOracle::new(VerifiedSet::default(), EulerMaclaurin);
    let outcome = oracle
        .scan(
            &ScanRequest::new()
                .starting_at(FIRST_ZEROS[0])
                .count(1)
                .mode(ScanMode::Search),
        )
        .expect("scan");
    assert_eq!(outcome.deviations.len(), 1);
    assert!(outcome.deviations[0].magnitude < 1e-10);
}

#[test]
fn real_evaluator_fractures_between_zeros() {
    let mut oracle = ZeroOracle::new(verified(&FIRST_ZEROS[..1]), EulerMaclaurin);
    let outcome = oracle
        .scan(&ScanRequest::new().starting_at(15.0).count(100))
        .expect("scan");
    assert_eq!(outcome.deviations.len(), 4);
    assert!(outcome.is_fractured());
    let ts: Vec<f64> = outcome.deviations.iter().map(|d| d.t).collect();
    assert_eq!(ts, vec![15.0, 16.0, 17.0, 18.0]);
}

fn wobble(t: f64) -> Complex64 {
    // Deterministic mix of tiny and large magnitudes.
    if (t * 7.0).sin() > 0.3 {
        Complex64::new(1e-12, 0.0)
    } else {
        Complex64::new(0.5, -0.25)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Identical requests against the same set produce identical deviations.
    #[test]
    fn scans_are_deterministic(start in 0.0f64..100.0, count in 0usize..30, search in any::<bool>()) {
        let mode = if search { ScanMode::Search } else { ScanMode::Verification };
        let request = ScanRequest::new().starting_at(start).count(count).step(0.37).mode(mode);
        let mut a = ZeroOracle::new(VerifiedSet::default(), ScriptedEvaluator::by_ordinate(wobble));
        let mut b = ZeroOracle::new(VerifiedSet::default(), ScriptedEvaluator::by_ordinate(wobble));
        prop_assert_eq!(a.scan(&request).unwrap(), b.scan(&request).unwrap());
        prop_assert_eq!(a.scan(&request).unwrap(), b.scan(&request).unwrap());
    }

    /// The two modes flag complementary points (three points never reach the breaker).
    #[test]
    fn modes_flag_complements(start in 0.0f64..100.0, count in 0usize..=3) {
        let request = ScanRequest::new().starting_at(start).count(count).step(0.37);
        let mut oracle = ZeroOracle::new(VerifiedSet::default(), ScriptedEvaluator::by_ordinate(wobble));

        let verification = oracle.scan(&request.clone().mode(ScanMode::Verification)).unwrap();
        let search = oracle.scan(&request.clone().mode(ScanMode::Search)).unwrap();
        prop_assert!(!verification.is_fractured() && !search.is_fractured());

        let mut flagged: Vec<f64> = verification
            .deviations
            .iter()
            .chain(search.deviations.iter())
            .map(|d| d.t)
            .collect();
        flagged.sort_by(|x, y| x.total_cmp(y));
        let all: Vec<f64> = (0..count).map(|i| request.point(start, i)).collect();
        prop_assert_eq!(flagged, all);
    }
}
