//! Shared helpers for oracle integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

/// Ordinates of the first five nontrivial zeros, to double precision.
pub const FIRST_ZEROS: [f64; 5] = [
    14.134_725_141_734_694,
    21.022_039_638_771_555,
    25.010_857_580_145_689,
    30.424_876_125_859_513,
    32.935_061_587_739_19,
];

/// Write `contents` to a file named `name` inside `dir`.
pub fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create source");
    file.write_all(contents.as_bytes()).expect("write source");
    path
}

/// One value per line with full round-trip precision.
pub fn lines(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v:?}\n")).collect()
}
