//! The zero verification oracle.

use std::path::Path;

use critline_arith::{EulerMaclaurin, ZetaEvaluator};
use critline_types::{
    is_fractured, Deviation, Precision, ProbePoint, ScanOutcome, Termination, VerifiedSet,
    DEFAULT_EPSILON, FRACTURE_THRESHOLD,
};
use num_complex::Complex64;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::candidates::{check_candidates, CandidateOptions, CandidateReport};
use crate::locate::zero_by_index;
use crate::refine::{refine_zero, RefinedZero};
use crate::sample::{sample_indices, SampleFailure, SampleReport};
use crate::sources::{load_verified_set, LoadReport, ZeroSources};
use crate::{classify, Classification, OracleError, ScanRequest};

/// Verified zeros plus the evaluator used to probe beyond them.
///
/// The verified set never changes after construction; the deviation list is
/// replaced by every [`scan`](ZeroOracle::scan).
pub struct ZeroOracle<E: ZetaEvaluator = EulerMaclaurin> {
    verified: VerifiedSet,
    evaluator: E,
    precision: Precision,
    deviations: Vec<Deviation>,
}

impl ZeroOracle<EulerMaclaurin> {
    /// Load the sources and build an oracle with the arbitrary-precision evaluator.
    pub fn load(sources: &ZeroSources) -> Result<(Self, LoadReport), OracleError> {
        Self::load_with(sources, EulerMaclaurin)
    }
}

impl<E: ZetaEvaluator> ZeroOracle<E> {
    pub fn new(verified: VerifiedSet, evaluator: E) -> Self {
        Self {
            verified,
            evaluator,
            precision: Precision::default(),
            deviations: Vec::new(),
        }
    }

    pub fn load_with(sources: &ZeroSources, evaluator: E) -> Result<(Self, LoadReport), OracleError> {
        let (verified, report) = load_verified_set(sources)?;
        Ok((Self::new(verified, evaluator), report))
    }

    /// Precision used by scans, sample validation and refinement.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn verified(&self) -> &VerifiedSet {
        &self.verified
    }

    pub fn max_verified(&self) -> Option<f64> {
        self.verified.max()
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Deviations collected by the most recent scan.
    pub fn last_deviations(&self) -> &[Deviation] {
        &self.deviations
    }

    /// `zeta(0.5 + i·t)` at an explicit precision.
    pub fn evaluate(&self, t: f64, precision: Precision) -> Result<Complex64, OracleError> {
        Ok(self.evaluator.on_critical_line(t, precision)?)
    }

    /// Evaluate independent points in parallel; output order matches input order.
    pub fn evaluate_many(&self, ts: &[f64], precision: Precision) -> Result<Vec<ProbePoint>, OracleError> {
        let points = ts
            .par_iter()
            .map(|&t| {
                self.evaluator
                    .on_critical_line(t, precision)
                    .map(|zeta| ProbePoint::new(t, zeta))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(points)
    }

    pub fn classify(&self, zeta: Complex64, epsilon: f64) -> Classification {
        classify(zeta, epsilon)
    }

    /// Walk `t_i = start + i·step` and flag points according to the scan mode.
    ///
    /// Halts as soon as the deviation count exceeds the fracture threshold;
    /// both endings are successful results.
    pub fn scan(&mut self, request: &ScanRequest) -> Result<ScanOutcome, OracleError> {
        request.validate()?;
        self.deviations.clear();

        let start = request
            .start_t
            .unwrap_or_else(|| self.verified.max().unwrap_or(0.0) + request.step);
        info!(
            "scanning {} points from t = {start:.6} (step {}, epsilon {:.2e}, {} mode, fracture threshold {:.2})",
            request.count,
            request.step,
            request.epsilon,
            request.mode.as_str(),
            FRACTURE_THRESHOLD
        );

        let progress_every = (request.count / 10).max(1);
        for i in 0..request.count {
            let t = request.point(start, i);
            let zeta = self.evaluator.on_critical_line(t, self.precision)?;
            let class = classify(zeta, request.epsilon);

            if request.mode.flags(class.on_critical_line) {
                let deviation = Deviation::from(ProbePoint::new(t, zeta));
                if class.on_critical_line {
                    info!("potential zero at {deviation}");
                } else {
                    debug!("non-zero point at {deviation}");
                }
                self.deviations.push(deviation);
            }

            if is_fractured(self.deviations.len()) {
                warn!(
                    "fracture threshold crossed: {} deviations > {:.2}, halting after {} points",
                    self.deviations.len(),
                    FRACTURE_THRESHOLD,
                    i + 1
                );
                return Ok(ScanOutcome {
                    deviations: self.deviations.clone(),
                    termination: Termination::Fractured,
                    points_checked: i + 1,
                });
            }

            if (i + 1) % progress_every == 0 {
                debug!(
                    "progress {}/{} ({} deviations)",
                    i + 1,
                    request.count,
                    self.deviations.len()
                );
            }
        }

        info!(
            "scan complete: {} points, {} flagged",
            request.count,
            self.deviations.len()
        );
        Ok(ScanOutcome {
            deviations: self.deviations.clone(),
            termination: Termination::Completed,
            points_checked: request.count,
        })
    }

    /// Re-evaluate evenly spaced known zeros at the default epsilon.
    pub fn sample_report(&self, sample_size: usize) -> Result<SampleReport, OracleError> {
        let ts: Vec<f64> = sample_indices(self.verified.len(), sample_size)
            .into_iter()
            .filter_map(|i| self.verified.get(i))
            .collect();
        info!("validating oracle against {} known zeros", ts.len());

        let failures = self
            .evaluate_many(&ts, self.precision)?
            .into_iter()
            .filter_map(|point| {
                let class = classify(point.zeta, DEFAULT_EPSILON);
                (!class.on_critical_line).then_some(SampleFailure {
                    t: point.t,
                    magnitude: class.magnitude,
                })
            })
            .collect();

        let report = SampleReport {
            sampled: ts.len(),
            failures,
        };
        if report.passed() {
            info!("all {} sampled zeros verified", report.sampled);
        } else {
            warn!(
                "{} of {} sampled zeros failed verification",
                report.failures.len(),
                report.sampled
            );
            for failure in report.examples() {
                warn!("  t = {:.6}: |zeta| = {:.2e}", failure.t, failure.magnitude);
            }
        }
        Ok(report)
    }

    /// Whether every sampled known zero classifies as on the critical line.
    pub fn validate_sample(&self, sample_size: usize) -> Result<bool, OracleError> {
        Ok(self.sample_report(sample_size)?.passed())
    }

    /// Locate the zero nearest `guess` at the oracle's precision.
    pub fn refine_zero(&self, guess: f64) -> Result<RefinedZero, OracleError> {
        refine_zero(&self.evaluator, guess, self.precision)
    }

    /// The `n`-th zero on the critical line (1-based).
    pub fn zero_by_index(&self, n: u64) -> Result<RefinedZero, OracleError> {
        zero_by_index(&self.evaluator, n, self.precision)
    }

    /// Confirm a file of candidate zeros against located zeros.
    pub fn check_candidates(
        &self,
        path: &Path,
        options: CandidateOptions,
    ) -> Result<CandidateReport, OracleError> {
        check_candidates(&self.evaluator, path, options, self.precision)
    }
}
