//! Oracle configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use critline_types::{
    Precision, ScanMode, CANDIDATE_TOLERANCE, DEFAULT_EPSILON, DEFAULT_SAMPLE_SIZE,
    DEFAULT_SCAN_COUNT, DEFAULT_STEP,
};

use crate::{CandidateOptions, OracleError, ScanRequest, ZeroSources};

/// Configuration for an oracle run.
///
/// Can be loaded from a TOML file via [`OracleConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Required source of verified zeros.
    #[serde(default = "default_zeros")]
    pub zeros: PathBuf,

    /// Optional additional sources, merged into the verified set.
    #[serde(default)]
    pub extra_zeros: Vec<PathBuf>,

    /// Working precision in decimal digits.
    #[serde(default)]
    pub precision: Precision,

    /// Classification tolerance for `|zeta|`.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Spacing between scan points.
    #[serde(default = "default_step")]
    pub step: f64,

    /// Number of scan points.
    #[serde(default = "default_count")]
    pub count: usize,

    /// Which classification a scan flags.
    #[serde(default)]
    pub mode: ScanMode,

    /// Known zeros re-evaluated by sample validation.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Agreement required by the candidate checker.
    #[serde(default = "default_candidate_tolerance")]
    pub candidate_tolerance: f64,

    /// Indexed candidates below this index are skipped.
    #[serde(default = "default_candidate_start_index")]
    pub candidate_start_index: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_zeros() -> PathBuf {
    PathBuf::from("Zeta_Zeroes.txt")
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

fn default_count() -> usize {
    DEFAULT_SCAN_COUNT
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_candidate_tolerance() -> f64 {
    CANDIDATE_TOLERANCE
}

fn default_candidate_start_index() -> u64 {
    1
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl OracleConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, OracleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OracleError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, OracleError> {
        toml::from_str(s).map_err(|e| OracleError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, OracleError> {
        toml::to_string_pretty(self).map_err(|e| OracleError::Config(e.to_string()))
    }

    pub fn sources(&self) -> ZeroSources {
        ZeroSources {
            primary: self.zeros.clone(),
            extra: self.extra_zeros.clone(),
        }
    }

    pub fn candidate_options(&self) -> CandidateOptions {
        CandidateOptions {
            tolerance: self.candidate_tolerance,
            start_index: self.candidate_start_index,
        }
    }

    /// Scan request built from the configured defaults (start at the verified maximum).
    pub fn scan_request(&self) -> ScanRequest {
        ScanRequest::new()
            .count(self.count)
            .epsilon(self.epsilon)
            .step(self.step)
            .mode(self.mode)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            zeros: default_zeros(),
            extra_zeros: Vec::new(),
            precision: Precision::default(),
            epsilon: default_epsilon(),
            step: default_step(),
            count: default_count(),
            mode: ScanMode::default(),
            sample_size: default_sample_size(),
            candidate_tolerance: default_candidate_tolerance(),
            candidate_start_index: default_candidate_start_index(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = OracleConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = OracleConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = OracleConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.precision.digits(), 50);
        assert_eq!(config.epsilon, 1e-10);
        assert_eq!(config.zeros, PathBuf::from("Zeta_Zeroes.txt"));
        assert_eq!(config.mode, ScanMode::Verification);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            precision = 30
            mode = "search"
            step = 0.1
            extra_zeros = ["extra_zeros.txt"]
            candidate_start_index = 3685252
        "#;
        let config = OracleConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.precision.digits(), 30);
        assert_eq!(config.mode, ScanMode::Search);
        assert_eq!(config.step, 0.1);
        assert_eq!(config.sources().extra, vec![PathBuf::from("extra_zeros.txt")]);
        assert_eq!(config.candidate_options().start_index, 3_685_252);
        assert_eq!(config.count, 1000); // default
    }

    #[test]
    fn zero_precision_is_rejected() {
        assert!(matches!(
            OracleConfig::from_toml_str("precision = 0"),
            Err(OracleError::Config(_))
        ));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = OracleConfig::from_toml_file(Path::new("/nonexistent/critline.toml"));
        assert!(matches!(result, Err(OracleError::Config(_))));
    }
}
