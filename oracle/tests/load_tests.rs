//! Loading and merging verified zero sources.

mod common;

use common::{lines, write_source};
use critline_oracle::{load_verified_set, OracleError, ZeroOracle, ZeroSources};
use proptest::prelude::*;

#[test]
fn merges_overlapping_sources() {
    let dir = tempfile::tempdir().expect("temp dir");
    let primary = write_source(&dir, "zeros.txt", "# verified\n3.0\n1.0\n2.0\n");
    let extra = write_source(&dir, "extra.txt", "2.0\n4.0\nbogus\n\n1.0\n");

    let sources = ZeroSources::new(&primary).with_extra(&extra);
    let (set, report) = load_verified_set(&sources).expect("load");

    assert_eq!(set.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(report.total, 4);
    assert_eq!(report.max, Some(4.0));
    assert_eq!(report.sources.len(), 2);
    assert_eq!(report.sources[0].accepted, 3);
    assert_eq!(report.sources[1].accepted, 4);
    assert_eq!(report.sources[1].skipped, 1);
}

#[test]
fn missing_extra_source_is_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let primary = write_source(&dir, "zeros.txt", "14.5\n");
    let sources = ZeroSources::new(&primary).with_extra(dir.path().join("extra_zeros.txt"));

    let (set, report) = load_verified_set(&sources).expect("missing extra is not fatal");
    assert_eq!(set.as_slice(), &[14.5]);
    assert!(report.sources[1].missing);
}

#[test]
fn missing_primary_source_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let extra = write_source(&dir, "extra.txt", "1.0\n");
    let sources = ZeroSources::new(dir.path().join("Zeta_Zeroes.txt")).with_extra(extra);

    match ZeroOracle::load(&sources) {
        Err(OracleError::MissingSource(path)) => assert!(path.ends_with("Zeta_Zeroes.txt")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("load should fail"),
    }
}

#[test]
fn empty_primary_gives_empty_set() {
    let dir = tempfile::tempdir().expect("temp dir");
    let primary = write_source(&dir, "zeros.txt", "# nothing yet\n");
    let (oracle, report) = ZeroOracle::load(&ZeroSources::new(primary)).expect("load");
    assert!(oracle.verified().is_empty());
    assert_eq!(oracle.max_verified(), None);
    assert_eq!(report.total, 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Two overlapping files load as the strictly increasing union of their values.
    #[test]
    fn load_is_sorted_union(
        a in prop::collection::vec(0.0f64..1e6, 0..40),
        b in prop::collection::vec(0.0f64..1e6, 0..40),
    ) {
        let dir = tempfile::tempdir().expect("temp dir");
        let shared: Vec<f64> = a.iter().take(5).copied().collect();
        let b: Vec<f64> = b.into_iter().chain(shared).collect();
        let primary = write_source(&dir, "a.txt", &lines(&a));
        let extra = write_source(&dir, "b.txt", &lines(&b));

        let (set, _) = load_verified_set(&ZeroSources::new(primary).with_extra(extra)).expect("load");

        prop_assert!(set.as_slice().windows(2).all(|w| w[0] < w[1]));
        let mut expected: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
        expected.sort_by(|x, y| x.total_cmp(y));
        expected.dedup();
        prop_assert_eq!(set.as_slice(), expected.as_slice());
    }
}
