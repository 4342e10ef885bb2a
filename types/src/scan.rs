//! Scan records: probe points, deviations, modes and outcomes.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CritlineError;

/// A trial ordinate together with `zeta(0.5 + i·t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbePoint {
    pub t: f64,
    pub zeta: Complex64,
}

impl ProbePoint {
    pub fn new(t: f64, zeta: Complex64) -> Self {
        Self { t, zeta }
    }

    pub fn magnitude(&self) -> f64 {
        self.zeta.norm()
    }
}

/// A probe point flagged by a scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deviation {
    pub t: f64,
    pub zeta: Complex64,
    pub magnitude: f64,
}

impl From<ProbePoint> for Deviation {
    fn from(p: ProbePoint) -> Self {
        Self {
            t: p.t,
            zeta: p.zeta,
            magnitude: p.magnitude(),
        }
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t = {:.6}: zeta = {:.2e} {:+.2e}i, |zeta| = {:.2e}",
            self.t, self.zeta.re, self.zeta.im, self.magnitude
        )
    }
}

/// Which classification a scan flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Flag points that are NOT on the critical line.
    #[default]
    Verification,
    /// Flag points that are on the critical line (candidate zeros).
    Search,
}

impl ScanMode {
    /// Whether a point with the given classification is flagged in this mode.
    pub fn flags(&self, on_critical_line: bool) -> bool {
        match self {
            Self::Verification => !on_critical_line,
            Self::Search => on_critical_line,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::Search => "search",
        }
    }
}

impl FromStr for ScanMode {
    type Err = CritlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verification" | "verify" => Ok(Self::Verification),
            "search" => Ok(Self::Search),
            other => Err(CritlineError::UnknownScanMode(other.to_string())),
        }
    }
}

/// How a scan ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every requested point was evaluated.
    Completed,
    /// The deviation count crossed the fracture threshold.
    Fractured,
}

/// Result of one scan invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanOutcome {
    pub deviations: Vec<Deviation>,
    pub termination: Termination,
    /// Number of points evaluated before the scan ended.
    pub points_checked: usize,
}

impl ScanOutcome {
    pub fn is_fractured(&self) -> bool {
        self.termination == Termination::Fractured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_flag_opposite_classifications() {
        for on_line in [true, false] {
            assert_ne!(
                ScanMode::Verification.flags(on_line),
                ScanMode::Search.flags(on_line)
            );
        }
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("search".parse::<ScanMode>().unwrap(), ScanMode::Search);
        assert_eq!("Verification".parse::<ScanMode>().unwrap(), ScanMode::Verification);
        assert!("sideways".parse::<ScanMode>().is_err());
    }

    #[test]
    fn deviation_takes_probe_magnitude() {
        let d = Deviation::from(ProbePoint::new(1.0, Complex64::new(3.0, 4.0)));
        assert_eq!(d.magnitude, 5.0);
    }
}
