//! The verified zero set.

/// Strictly increasing, duplicate-free ordinates of known zeta zeros.
///
/// Built once from parsed sources; immutable afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerifiedSet {
    zeros: Vec<f64>,
}

impl VerifiedSet {
    /// Build from arbitrary values: non-finite values are dropped, the rest
    /// sorted ascending with exact duplicates removed.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut zeros: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        zeros.sort_by(|a, b| a.total_cmp(b));
        zeros.dedup();
        Self { zeros }
    }

    pub fn len(&self) -> usize {
        self.zeros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zeros.is_empty()
    }

    pub fn max(&self) -> Option<f64> {
        self.zeros.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.zeros.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.zeros
    }

    /// Mean gap between consecutive values among the last `last_n` zeros.
    ///
    /// Returns `None` when fewer than two values are available.
    pub fn mean_spacing(&self, last_n: usize) -> Option<f64> {
        let start = self.zeros.len().saturating_sub(last_n);
        let tail = &self.zeros[start..];
        if tail.len() < 2 {
            return None;
        }
        Some((tail[tail.len() - 1] - tail[0]) / (tail.len() - 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_dedups() {
        let set = VerifiedSet::from_values([3.0, 1.0, 2.0, 1.0, 3.0]);
        assert_eq!(set.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(set.max(), Some(3.0));
    }

    #[test]
    fn drops_non_finite() {
        let set = VerifiedSet::from_values([f64::NAN, 1.0, f64::INFINITY]);
        assert_eq!(set.as_slice(), &[1.0]);
    }

    #[test]
    fn empty_set_has_no_max() {
        let set = VerifiedSet::default();
        assert!(set.is_empty());
        assert_eq!(set.max(), None);
        assert_eq!(set.mean_spacing(10), None);
    }

    #[test]
    fn mean_spacing_uses_tail() {
        let set = VerifiedSet::from_values([0.0, 100.0, 101.0, 103.0]);
        assert_eq!(set.mean_spacing(3), Some(1.5));
        assert_eq!(set.mean_spacing(1000), Some(103.0 / 3.0));
    }
}
