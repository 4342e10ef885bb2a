//! Evenly spaced self-check samples of the verified set.

use critline_types::MAX_REPORTED_FAILURES;

/// Indices `floor(i·(len-1)/(k-1))` for `i = 0..k`, with `k = min(sample_size, len)`.
///
/// Deterministic and sorted; never out of bounds.
pub fn sample_indices(len: usize, sample_size: usize) -> Vec<usize> {
    let k = sample_size.min(len);
    match k {
        0 => Vec::new(),
        1 => vec![0],
        _ => (0..k).map(|i| i * (len - 1) / (k - 1)).collect(),
    }
}

/// A known zero that did not classify as on the critical line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleFailure {
    pub t: f64,
    pub magnitude: f64,
}

/// Outcome of a sample validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleReport {
    /// Number of known zeros evaluated.
    pub sampled: usize,
    pub failures: Vec<SampleFailure>,
}

impl SampleReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failures worth echoing in a report.
    pub fn examples(&self) -> &[SampleFailure] {
        &self.failures[..self.failures.len().min(MAX_REPORTED_FAILURES)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_first_to_last() {
        assert_eq!(sample_indices(10, 4), vec![0, 3, 6, 9]);
        assert_eq!(sample_indices(5, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn clamps_to_length() {
        assert_eq!(sample_indices(3, 100), vec![0, 1, 2]);
        assert_eq!(sample_indices(0, 10), Vec::<usize>::new());
        assert_eq!(sample_indices(7, 1), vec![0]);
        assert_eq!(sample_indices(7, 0), Vec::<usize>::new());
    }

    #[test]
    fn examples_are_capped() {
        let report = SampleReport {
            sampled: 10,
            failures: (0..8)
                .map(|i| SampleFailure { t: i as f64, magnitude: 1.0 })
                .collect(),
        };
        assert!(!report.passed());
        assert_eq!(report.examples().len(), 5);
    }
}
