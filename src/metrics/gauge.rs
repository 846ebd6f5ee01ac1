use std::sync::Arc;
use std::time::Instant;

use crate::atomic::AtomicF64;
use crate::family::Metric;
use crate::label::LabelValues;
use crate::metric::{MetricKind, Sample};
use crate::timestamp;

/// `Gauge` is a metric that represents a single numerical value that can
/// arbitrarily go up and down.
///
/// Cloned gauges share the same value.
///
/// # References
///
/// - [Metric types](https://prometheus.io/docs/concepts/metric_types/#gauge)
#[derive(Debug, Clone)]
pub struct Gauge(Arc<Inner>);
impl Gauge {
    /// Increments this gauge by one.
    pub fn inc(&self) {
        self.inc_by(1.0);
    }

    /// Adds `delta` to this gauge.
    pub fn inc_by(&self, delta: f64) {
        self.0.value.add(delta);
    }

    /// Decrements this gauge by one.
    pub fn dec(&self) {
        self.dec_by(1.0);
    }

    /// Subtracts `delta` from this gauge.
    pub fn dec_by(&self, delta: f64) {
        self.0.value.add(-delta);
    }

    /// Sets this gauge to `value`.
    ///
    /// The store is atomic; concurrent `set` calls race last-writer-wins.
    pub fn set(&self, value: f64) {
        self.0.value.set(value);
    }

    /// Sets this gauge to the current wall-clock time, in seconds since the
    /// unix epoch.
    pub fn set_to_current_time(&self) {
        self.set(timestamp::unixtime_seconds());
    }

    /// Starts measuring a span of time.
    ///
    /// When the returned guard is dropped, this gauge is set to the elapsed
    /// time in fractional seconds. The gauge is updated on every exit path
    /// of the enclosing scope, early returns and panics included.
    pub fn timer(&self) -> GaugeTimer {
        GaugeTimer {
            gauge: self.clone(),
            start: Instant::now(),
        }
    }

    /// Measures the execution time of `f` and sets this gauge to its
    /// duration in seconds.
    pub fn time<F, T>(&self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _timer = self.timer();
        f()
    }

    /// Tracks an in-flight operation.
    ///
    /// The gauge is incremented by one now and decremented by one when the
    /// returned guard is dropped, so its value is the number of guards
    /// currently alive.
    pub fn track_in_progress(&self) -> InProgressGuard {
        self.inc();
        InProgressGuard {
            gauge: self.clone(),
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> f64 {
        self.0.value.get()
    }

    /// Returns the label values assigned to this gauge at creation.
    pub fn label_values(&self) -> &LabelValues {
        &self.0.label_values
    }

    /// Returns `true` if both handles refer to the same underlying gauge.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn new(label_values: LabelValues) -> Self {
        Gauge(Arc::new(Inner {
            label_values,
            value: AtomicF64::new(0.0),
        }))
    }
}
impl Metric for Gauge {
    type Descriptor = ();

    fn with_descriptor(label_values: LabelValues, _descriptor: &()) -> Self {
        Gauge::new(label_values)
    }

    fn kind() -> MetricKind {
        MetricKind::Gauge
    }

    fn label_values(&self) -> &LabelValues {
        &self.0.label_values
    }

    fn append_samples(&self, name: &str, label_names: &[String], samples: &mut Vec<Sample>) {
        samples.push(Sample {
            name: name.to_string(),
            value: self.value(),
            label_names: label_names.to_vec(),
            label_values: self.0.label_values.clone(),
        });
    }
}

/// Scope guard created by [`Gauge::timer`].
///
/// Sets the owning gauge to the elapsed seconds when dropped. The guard is
/// deliberately not cloneable so that exactly one measurement is recorded
/// per span.
#[must_use = "dropping the timer immediately records a near-zero duration"]
#[derive(Debug)]
pub struct GaugeTimer {
    gauge: Gauge,
    start: Instant,
}
impl Drop for GaugeTimer {
    fn drop(&mut self) {
        self.gauge
            .set(timestamp::duration_to_seconds(self.start.elapsed()));
    }
}

/// Scope guard created by [`Gauge::track_in_progress`].
///
/// Decrements the owning gauge when dropped.
#[must_use = "dropping the guard immediately ends the tracked operation"]
#[derive(Debug)]
pub struct InProgressGuard {
    gauge: Gauge,
}
impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

#[derive(Debug)]
struct Inner {
    label_values: LabelValues,
    value: AtomicF64,
}
