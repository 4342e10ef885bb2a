use std::path::PathBuf;

use critline_arith::ArithError;
use critline_types::CritlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("zero source not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("evaluation error: {0}")]
    Arith(#[from] ArithError),

    #[error("invalid value: {0}")]
    Value(#[from] CritlineError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("refinement from t = {guess} failed: {reason}")]
    RefinementFailed { guess: f64, reason: String },

    #[error("could not locate zero #{index}: {reason}")]
    ZeroNotLocated { index: u64, reason: String },

    #[error("config error: {0}")]
    Config(String),
}
