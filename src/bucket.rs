//! Buckets for [histogram][histogram] metrics.
//!
//! [histogram]: https://prometheus.io/docs/concepts/metric_types/#histogram
use crate::atomic::AtomicU64;

/// A bucket in which a histogram counts observations.
///
/// Counts are cumulative: a bucket counts every observation less than or
/// equal to its upper bound, so the count of the trailing `+Inf` bucket is
/// the total observation count.
#[derive(Debug)]
pub struct Bucket {
    upper_bound: f64,
    count: AtomicU64,
}
impl Bucket {
    /// Returns the upper bound of this bucket.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Returns the cumulative count of observations in this bucket.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    pub(crate) fn new(upper_bound: f64) -> Self {
        Bucket {
            upper_bound,
            count: AtomicU64::new(0),
        }
    }

    pub(crate) fn increment(&self) {
        self.count.inc();
    }
}

/// Returns the default bucket bounds, tailored to measure request durations
/// in seconds.
pub fn default_buckets() -> Vec<f64> {
    vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
}

/// Returns `count` bounds starting at `start` and spaced `width` apart.
///
/// Histograms append one more bucket with bound `+Inf`, so the resulting
/// histogram has `count + 1` buckets in total.
///
/// # Panics
///
/// `count` must be at least one.
pub fn linear_buckets(start: f64, width: f64, count: usize) -> Vec<f64> {
    assert!(count >= 1, "a histogram needs at least one finite bucket");
    (0..count).map(|i| start + i as f64 * width).collect()
}

/// Returns `count` bounds starting at `start`, each `factor` times the previous.
///
/// Histograms append one more bucket with bound `+Inf`, so the resulting
/// histogram has `count + 1` buckets in total.
///
/// # Panics
///
/// `count` must be at least one.
pub fn exponential_buckets(start: f64, factor: f64, count: usize) -> Vec<f64> {
    assert!(count >= 1, "a histogram needs at least one finite bucket");
    let mut bounds = Vec::with_capacity(count);
    let mut bound = start;
    for _ in 0..count {
        bounds.push(bound);
        bound *= factor;
    }
    bounds
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn linear_bounds() {
        assert_eq!(linear_buckets(0.0, 1.0, 5), [0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(linear_buckets(0.5, 0.25, 3), [0.5, 0.75, 1.0]);
    }

    #[test]
    fn exponential_bounds() {
        assert_eq!(exponential_buckets(1.0, 2.0, 4), [1.0, 2.0, 4.0, 8.0]);
        assert_eq!(exponential_buckets(0.1, 10.0, 1), [0.1]);
    }

    #[test]
    #[should_panic]
    fn linear_bounds_need_at_least_one_bucket() {
        linear_buckets(0.0, 1.0, 0);
    }

    #[test]
    #[should_panic]
    fn exponential_bounds_need_at_least_one_bucket() {
        exponential_buckets(1.0, 2.0, 0);
    }
}
