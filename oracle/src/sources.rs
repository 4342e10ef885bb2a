//! Loading verified zeros from text sources.
//!
//! Format: one decimal value per line. Blank lines and lines starting with `#`
//! are ignored; lines that do not parse as a finite number are skipped.

use std::path::{Path, PathBuf};

use critline_types::VerifiedSet;
use tracing::{debug, info, warn};

use crate::OracleError;

/// Where the verified zeros come from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZeroSources {
    /// Required source; loading fails if it does not exist.
    pub primary: PathBuf,
    /// Optional sources; missing ones are skipped with a warning.
    pub extra: Vec<PathBuf>,
}

impl ZeroSources {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra.push(path.into());
        self
    }
}

/// Per-source load counts.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceStats {
    pub path: PathBuf,
    /// Values parsed (before merging).
    pub accepted: usize,
    /// Malformed lines.
    pub skipped: usize,
    /// Whether the source was absent.
    pub missing: bool,
}

/// Diagnostic summary of one load.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadReport {
    pub sources: Vec<SourceStats>,
    /// Distinct values after merging.
    pub total: usize,
    pub max: Option<f64>,
}

/// Classification of one source line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Line<'a> {
    Ignored,
    Content(&'a str),
}

pub(crate) fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        Line::Ignored
    } else {
        Line::Content(line)
    }
}

pub(crate) fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse source text into values plus the number of malformed lines.
pub fn parse_values(contents: &str) -> (Vec<f64>, usize) {
    let mut values = Vec::new();
    let mut skipped = 0;
    for line in contents.lines() {
        if let Line::Content(text) = classify_line(line) {
            match parse_finite(text) {
                Some(v) => values.push(v),
                None => skipped += 1,
            }
        }
    }
    (values, skipped)
}

/// Read a source file; `Ok(None)` if it does not exist.
pub(crate) fn read_source(path: &Path) -> Result<Option<String>, OracleError> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Load and merge all sources into a [`VerifiedSet`].
pub fn load_verified_set(sources: &ZeroSources) -> Result<(VerifiedSet, LoadReport), OracleError> {
    let primary = read_source(&sources.primary)?
        .ok_or_else(|| OracleError::MissingSource(sources.primary.clone()))?;

    let mut all = Vec::new();
    let mut stats = Vec::with_capacity(1 + sources.extra.len());

    let (values, skipped) = parse_values(&primary);
    info!(
        "loaded {} verified zeros from {}",
        values.len(),
        sources.primary.display()
    );
    if skipped > 0 {
        debug!("skipped {skipped} malformed lines in {}", sources.primary.display());
    }
    stats.push(SourceStats {
        path: sources.primary.clone(),
        accepted: values.len(),
        skipped,
        missing: false,
    });
    all.extend(values);

    for path in &sources.extra {
        let Some(contents) = read_source(path)? else {
            warn!("zero source not found: {} (skipping)", path.display());
            stats.push(SourceStats {
                path: path.clone(),
                accepted: 0,
                skipped: 0,
                missing: true,
            });
            continue;
        };
        let (values, skipped) = parse_values(&contents);
        if !values.is_empty() {
            info!("loaded {} additional zeros from {}", values.len(), path.display());
        }
        if skipped > 0 {
            debug!("skipped {skipped} malformed lines in {}", path.display());
        }
        stats.push(SourceStats {
            path: path.clone(),
            accepted: values.len(),
            skipped,
            missing: false,
        });
        all.extend(values);
    }

    let set = VerifiedSet::from_values(all);
    info!("total verified zeros: {}", set.len());
    match set.max() {
        Some(max) => info!("maximum verified imaginary part: {max:.6}"),
        None => warn!("verified set is empty"),
    }

    let report = LoadReport {
        sources: stats,
        total: set.len(),
        max: set.max(),
    };
    Ok((set, report))
}
