use std::f64::INFINITY;
use std::sync::Arc;
use std::time::Instant;

use crate::atomic::AtomicF64;
use crate::bucket::Bucket;
use crate::family::Metric;
use crate::format::SampleValue;
use crate::label::LabelValues;
use crate::metric::{MetricKind, Sample};
use crate::timestamp;
use crate::{ErrorKind, Result};

/// The construction-time data shared by every histogram of one family: the
/// finite bucket bounds.
///
/// Bounds are validated once, at family construction, and shared by
/// reference afterwards; a trailing `+Inf` bucket is appended to each
/// histogram on top of them.
#[derive(Debug, Clone)]
pub struct HistogramDescriptor {
    bounds: Arc<Vec<f64>>,
}
impl HistogramDescriptor {
    /// Makes a descriptor from the given finite bucket bounds.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidInput` if `bounds` is empty, contains a NaN, or is
    /// not strictly increasing.
    pub fn new(bounds: Vec<f64>) -> Result<Self> {
        track_assert!(
            !bounds.is_empty(),
            ErrorKind::InvalidInput,
            "a histogram needs at least one finite bucket"
        );
        for bound in &bounds {
            track_assert!(!bound.is_nan(), ErrorKind::InvalidInput);
        }
        for pair in bounds.windows(2) {
            track_assert!(
                pair[0] < pair[1],
                ErrorKind::InvalidInput,
                "bucket bounds must be strictly increasing: {:?} >= {:?}",
                pair[0],
                pair[1]
            );
        }
        Ok(HistogramDescriptor {
            bounds: Arc::new(bounds),
        })
    }

    /// Returns the finite bucket bounds, ascending.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }
}

/// `Histogram` counts observations (usually request durations or response
/// sizes) in buckets with fixed bounds, and keeps a sum of all observed
/// values.
///
/// Cloned histograms share the same buckets. Bucket counts are cumulative:
/// each bucket counts every observation less than or equal to its upper
/// bound, so an `observe` call touches every bucket from the first one whose
/// bound covers the value.
///
/// # References
///
/// - [Metric types](https://prometheus.io/docs/concepts/metric_types/#histogram)
#[derive(Debug, Clone)]
pub struct Histogram(Arc<Inner>);
impl Histogram {
    /// Observes a value.
    ///
    /// Increments the count of every bucket whose upper bound covers `value`
    /// and adds `value` to the sum. Runs in O(number of buckets); buckets
    /// are expected to number in the tens.
    ///
    /// # Panics
    ///
    /// `value` must not be NaN.
    pub fn observe(&self, value: f64) {
        assert!(!value.is_nan(), "cannot observe NaN");
        for bucket in &self.0.buckets {
            if value <= bucket.upper_bound() {
                bucket.increment();
            }
        }
        self.0.sum.add(value);
    }

    /// Starts measuring a span of time.
    ///
    /// When the returned guard is dropped, the elapsed time in fractional
    /// seconds is observed. The observation happens on every exit path of
    /// the enclosing scope, early returns and panics included.
    pub fn timer(&self) -> HistogramTimer {
        HistogramTimer {
            histogram: self.clone(),
            start: Instant::now(),
        }
    }

    /// Measures the execution time of `f` and observes its duration in
    /// seconds.
    pub fn time<F, T>(&self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _timer = self.timer();
        f()
    }

    /// Returns the buckets of this histogram, ascending by bound, the `+Inf`
    /// bucket last.
    pub fn buckets(&self) -> &[Bucket] {
        &self.0.buckets
    }

    /// Returns the sum of all observed values.
    pub fn sum(&self) -> f64 {
        self.0.sum.get()
    }

    /// Returns the total observation count.
    pub fn count(&self) -> u64 {
        self.0.buckets.last().map_or(0, Bucket::count)
    }

    /// Returns the label values assigned to this histogram at creation.
    pub fn label_values(&self) -> &LabelValues {
        &self.0.label_values
    }

    /// Returns `true` if both handles refer to the same underlying histogram.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn new(label_values: LabelValues, descriptor: &HistogramDescriptor) -> Self {
        let mut buckets: Vec<Bucket> = descriptor.bounds().iter().map(|&b| Bucket::new(b)).collect();
        buckets.push(Bucket::new(INFINITY));
        Histogram(Arc::new(Inner {
            label_values,
            buckets,
            sum: AtomicF64::new(0.0),
        }))
    }
}
impl Metric for Histogram {
    type Descriptor = HistogramDescriptor;

    fn with_descriptor(label_values: LabelValues, descriptor: &HistogramDescriptor) -> Self {
        Histogram::new(label_values, descriptor)
    }

    fn kind() -> MetricKind {
        MetricKind::Histogram
    }

    fn label_values(&self) -> &LabelValues {
        &self.0.label_values
    }

    fn append_samples(&self, name: &str, label_names: &[String], samples: &mut Vec<Sample>) {
        let mut bucket_label_names = label_names.to_vec();
        bucket_label_names.push("le".to_string());

        for bucket in self.buckets() {
            let mut bucket_label_values = self.0.label_values.clone();
            bucket_label_values.push(SampleValue(bucket.upper_bound()).to_string());
            samples.push(Sample {
                name: format!("{}_bucket", name),
                value: bucket.count() as f64,
                label_names: bucket_label_names.clone(),
                label_values: bucket_label_values,
            });
        }
        samples.push(Sample {
            name: format!("{}_sum", name),
            value: self.sum(),
            label_names: label_names.to_vec(),
            label_values: self.0.label_values.clone(),
        });
        samples.push(Sample {
            name: format!("{}_count", name),
            value: self.count() as f64,
            label_names: label_names.to_vec(),
            label_values: self.0.label_values.clone(),
        });
    }
}

/// Scope guard created by [`Histogram::timer`].
///
/// Observes the elapsed seconds when dropped. The guard is deliberately not
/// cloneable so that exactly one observation is recorded per span.
#[must_use = "dropping the timer immediately observes a near-zero duration"]
#[derive(Debug)]
pub struct HistogramTimer {
    histogram: Histogram,
    start: Instant,
}
impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram
            .observe(timestamp::duration_to_seconds(self.start.elapsed()));
    }
}

#[derive(Debug)]
struct Inner {
    label_values: LabelValues,
    buckets: Vec<Bucket>,
    sum: AtomicF64,
}
