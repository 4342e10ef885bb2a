//! Offline confirmation of externally supplied candidate zeros.
//!
//! A candidate file holds one candidate per line, either `index value` or a
//! bare `value`. An indexed candidate is compared with the zero located by
//! [`zero_by_index`], so it must match both the value and its position in the
//! ordering of zeros. A bare value is refined to the nearest zero and
//! confirmed when the two agree within the tolerance.

use std::path::Path;

use critline_arith::ZetaEvaluator;
use critline_types::{Precision, CANDIDATE_TOLERANCE};
use tracing::{info, warn};

use crate::locate::zero_by_index;
use crate::refine::{refine_zero, RefinedZero};
use crate::sources::{classify_line, parse_finite, read_source, Line};
use crate::OracleError;

/// Outcome for a single candidate.
#[derive(Clone, Debug, PartialEq)]
pub enum CandidateStatus {
    /// Located zero within tolerance of the candidate.
    Confirmed,
    /// Zero found, but too far from the candidate.
    Mismatch { difference: f64 },
    /// No zero could be located for the candidate.
    Unresolved(String),
}

/// One parsed candidate line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Claimed 1-based position among the zeros, when the line carries one.
    pub index: Option<u64>,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandidateCheck {
    /// 1-based line number in the candidate file.
    pub line: usize,
    pub index: Option<u64>,
    pub candidate: f64,
    /// The zero the candidate was compared against.
    pub located: Option<RefinedZero>,
    pub status: CandidateStatus,
}

/// Tolerance and index filter for a candidate run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateOptions {
    /// Maximum allowed `|located - candidate|`.
    pub tolerance: f64,
    /// Indexed candidates below this index are skipped.
    pub start_index: u64,
}

impl Default for CandidateOptions {
    fn default() -> Self {
        Self {
            tolerance: CANDIDATE_TOLERANCE,
            start_index: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateReport {
    pub checks: Vec<CandidateCheck>,
    /// Lines that held no parseable candidate.
    pub skipped_lines: usize,
    /// Indexed candidates below the start index.
    pub filtered: usize,
}

impl CandidateReport {
    pub fn confirmed(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CandidateStatus::Confirmed)
            .count()
    }

    pub fn all_confirmed(&self) -> bool {
        self.confirmed() == self.checks.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CandidateCheck> {
        self.checks
            .iter()
            .filter(|c| c.status != CandidateStatus::Confirmed)
    }
}

/// Parse one line: `value`, or `index value` with a positive integer index.
///
/// Fields past the second are ignored.
pub fn parse_candidate(line: &str) -> Option<Candidate> {
    let Line::Content(text) = classify_line(line) else {
        return None;
    };
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [value] => Some(Candidate {
            index: None,
            value: parse_finite(value)?,
        }),
        [index, value, ..] => Some(Candidate {
            index: Some(index.parse::<u64>().ok().filter(|&i| i > 0)?),
            value: parse_finite(value)?,
        }),
        [] => None,
    }
}

/// Locate the zero a candidate claims to be.
fn locate<E: ZetaEvaluator + ?Sized>(
    evaluator: &E,
    candidate: Candidate,
    precision: Precision,
) -> Result<RefinedZero, OracleError> {
    match candidate.index {
        Some(index) => zero_by_index(evaluator, index, precision),
        None => refine_zero(evaluator, candidate.value, precision),
    }
}

/// Check every candidate in `text`.
pub fn check_candidate_text<E: ZetaEvaluator + ?Sized>(
    evaluator: &E,
    text: &str,
    options: CandidateOptions,
    precision: Precision,
) -> CandidateReport {
    let mut report = CandidateReport::default();
    for (n, line) in text.lines().enumerate() {
        if classify_line(line) == Line::Ignored {
            continue;
        }
        let Some(candidate) = parse_candidate(line) else {
            report.skipped_lines += 1;
            continue;
        };
        if candidate.index.is_some_and(|i| i < options.start_index) {
            report.filtered += 1;
            continue;
        }
        let value = candidate.value;
        let (located, status) = match locate(evaluator, candidate, precision) {
            Ok(zero) => {
                let difference = (zero.t - value).abs();
                if difference <= options.tolerance {
                    (Some(zero), CandidateStatus::Confirmed)
                } else {
                    warn!(
                        "candidate {value} on line {} does not match located zero {:.12}",
                        n + 1,
                        zero.t
                    );
                    (Some(zero), CandidateStatus::Mismatch { difference })
                }
            }
            Err(e) => {
                warn!("candidate {value} on line {} unresolved: {e}", n + 1);
                (None, CandidateStatus::Unresolved(e.to_string()))
            }
        };
        report.checks.push(CandidateCheck {
            line: n + 1,
            index: candidate.index,
            candidate: value,
            located,
            status,
        });
        if report.checks.len() % 50 == 0 {
            info!("checked {} candidates", report.checks.len());
        }
    }
    report
}

/// Check every candidate in the file at `path`.
pub fn check_candidates<E: ZetaEvaluator + ?Sized>(
    evaluator: &E,
    path: &Path,
    options: CandidateOptions,
    precision: Precision,
) -> Result<CandidateReport, OracleError> {
    let text = read_source(path)?.ok_or_else(|| OracleError::MissingSource(path.to_path_buf()))?;
    let report = check_candidate_text(evaluator, &text, options, precision);
    info!(
        "{} of {} candidates confirmed from {} ({} below index {})",
        report.confirmed(),
        report.checks.len(),
        path.display(),
        report.filtered,
        options.start_index
    );
    Ok(report)
}
