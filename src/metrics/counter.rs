use std::sync::Arc;

use crate::atomic::AtomicF64;
use crate::family::Metric;
use crate::label::LabelValues;
use crate::metric::{MetricKind, Sample};

/// `Counter` is a cumulative metric whose value only ever goes up.
///
/// Cloned counters share the same value; handles returned by
/// [`MetricFamily::labels`](crate::MetricFamily::labels) may be cached and
/// updated from any number of threads without locking.
///
/// # References
///
/// - [Metric types](https://prometheus.io/docs/concepts/metric_types/#counter)
#[derive(Debug, Clone)]
pub struct Counter(Arc<Inner>);
impl Counter {
    /// Increments this counter by one.
    pub fn inc(&self) {
        self.inc_by(1.0);
    }

    /// Adds `delta` to this counter.
    ///
    /// Concurrent additions never lose updates.
    ///
    /// # Panics
    ///
    /// `delta` must be greater than zero; a non-positive delta is a bug in
    /// the instrumenting application.
    pub fn inc_by(&self, delta: f64) {
        assert!(delta > 0.0, "counter increments must be positive");
        self.0.value.add(delta);
    }

    /// Returns the current value.
    pub fn value(&self) -> f64 {
        self.0.value.get()
    }

    /// Returns the label values assigned to this counter at creation.
    pub fn label_values(&self) -> &LabelValues {
        &self.0.label_values
    }

    /// Returns `true` if both handles refer to the same underlying counter.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn new(label_values: LabelValues) -> Self {
        Counter(Arc::new(Inner {
            label_values,
            value: AtomicF64::new(0.0),
        }))
    }
}
impl Metric for Counter {
    type Descriptor = ();

    fn with_descriptor(label_values: LabelValues, _descriptor: &()) -> Self {
        Counter::new(label_values)
    }

    fn kind() -> MetricKind {
        MetricKind::Counter
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

#[derive(Debug)]
struct Inner {
    label_values: LabelValues,
    value: AtomicF64,
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::*;

    #[test]
    fn it_works() {
        let counter = Counter::new(LabelValues::default());
        assert_eq!(counter.value(), 0.0);

        counter.inc();
        assert_eq!(counter.value(), 1.0);

        counter.inc_by(3.45);
        assert_eq!(counter.value(), 4.45);
    }

    #[test]
    #[should_panic]
    fn zero_delta_is_rejected() {
        let counter = Counter::new(LabelValues::default());
        counter.inc_by(0.0);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let counter = Counter::new(LabelValues::default());
        let threads = 8;
        let increments = 10_000;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || {
                    for _ in 0..increments {
                        counter.inc();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        assert_eq!(counter.value(), f64::from(threads * increments));
    }
}
