//! Zero Verification Oracle.
//!
//! Holds a [`VerifiedSet`](critline_types::VerifiedSet) of known zero
//! ordinates and probes trial points against the zeta function:
//!
//! 1. **Load**: merge one required and any number of optional source files.
//! 2. **Evaluate / classify**: `zeta(0.5 + i·t)` at an explicit precision,
//!    compared with a fixed tolerance.
//! 3. **Scan**: walk a bounded grid of ordinates, flag deviations, and halt
//!    once the fracture threshold is crossed.
//! 4. **Validate**: re-evaluate evenly spaced known zeros as a self-check.
//!
//! Offline tools built on the same evaluator live in [`refine`] (locate the
//! zero nearest a guess), [`locate`] (the n-th zero by index) and
//! [`candidates`] (confirm a file of candidate zeros).

pub mod candidates;
pub mod classify;
pub mod config;
pub mod error;
pub mod locate;
pub mod oracle;
pub mod refine;
pub mod sample;
pub mod scan;
pub mod sources;

pub use candidates::{Candidate, CandidateCheck, CandidateOptions, CandidateReport, CandidateStatus};
pub use classify::{classify, Classification};
pub use config::OracleConfig;
pub use error::OracleError;
pub use locate::zero_by_index;
pub use oracle::ZeroOracle;
pub use refine::{refine_zero, RefinedZero};
pub use sample::{sample_indices, SampleFailure, SampleReport};
pub use scan::ScanRequest;
pub use sources::{load_verified_set, LoadReport, SourceStats, ZeroSources};
