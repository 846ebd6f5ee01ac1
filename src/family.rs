use std::collections::HashMap;
use std::fmt;

use atomic_immut::AtomicImmut;

use crate::collect::Collect;
use crate::label::{self, LabelValues};
use crate::metric::{Family, MetricKind, Sample};
use crate::{ErrorKind, Result};

/// A numeric primitive that can live inside a [`MetricFamily`].
///
/// Implementations are cheaply cloneable handles sharing one underlying
/// state (counters, gauges and histograms all are), so a family can hand out
/// clones that stay valid for its whole lifetime.
pub trait Metric: fmt::Debug + Clone + Send + Sync + 'static {
    /// Construction-time data shared read-only by every instance of one
    /// family, e.g. histogram bucket bounds.
    type Descriptor: fmt::Debug + Send + Sync + 'static;

    /// Creates the instance addressed by `label_values`.
    fn with_descriptor(label_values: LabelValues, descriptor: &Self::Descriptor) -> Self;

    /// Returns the exposition type tag of this primitive.
    fn kind() -> MetricKind;

    /// Returns the label tuple this instance was created for.
    fn label_values(&self) -> &LabelValues;

    /// Appends this instance's exposition samples to `samples`.
    fn append_samples(&self, name: &str, label_names: &[String], samples: &mut Vec<Sample>);
}

/// A family of counters, one per label value tuple.
pub type CounterFamily = MetricFamily<crate::metrics::Counter>;

/// A family of gauges, one per label value tuple.
pub type GaugeFamily = MetricFamily<crate::metrics::Gauge>;

/// A family of histograms sharing one set of bucket bounds, one histogram
/// per label value tuple.
pub type HistogramFamily = MetricFamily<crate::metrics::Histogram>;

/// A named, labeled metric family.
///
/// The family owns the declaration (name, help, label names, descriptor)
/// shared by all of its primitives, and the mapping from label value tuple
/// to primitive. Primitives are created lazily on first access and are never
/// removed: the family is append-only.
///
/// The tuple map is held behind a copy-on-write snapshot, so `labels`
/// lookups and `collect` never block; only first-time creation of a tuple
/// pays a copy, and two racing creations of the same tuple collapse to a
/// single winner.
///
/// # Examples
///
/// ```
/// use promfam::MetricFamily;
/// use promfam::metrics::Counter;
///
/// let family: MetricFamily<Counter> =
///     MetricFamily::new("requests_total", &["method"], "Number of requests", ()).unwrap();
///
/// family.labels(&["GET"]).inc();
/// family.labels(&["GET"]).inc();
/// assert_eq!(family.labels(&["GET"]).value(), 2.0);
/// assert_eq!(family.labels(&["PUT"]).value(), 0.0);
/// ```
#[derive(Debug)]
pub struct MetricFamily<M: Metric> {
    name: String,
    help: String,
    label_names: Vec<String>,
    descriptor: M::Descriptor,
    metrics: AtomicImmut<Instances<M>>,
}
impl<M: Metric> MetricFamily<M> {
    /// Makes a new `MetricFamily` instance.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidInput` if `name` does not match the metric name
    /// grammar, if any label name does not match the label name grammar, or
    /// if a histogram family declares the reserved `le` label.
    pub fn new(
        name: &str,
        label_names: &[&str],
        help: &str,
        descriptor: M::Descriptor,
    ) -> Result<Self> {
        track!(label::validate_metric_name(name))?;
        for label_name in label_names {
            track!(label::validate_label_name(label_name))?;
            if M::kind() == MetricKind::Histogram {
                track_assert!(
                    *label_name != "le",
                    ErrorKind::InvalidInput,
                    "the label name \"le\" is reserved for histogram buckets"
                );
            }
        }
        Ok(MetricFamily {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|n| n.to_string()).collect(),
            descriptor,
            metrics: AtomicImmut::new(Instances::new()),
        })
    }

    /// Returns the name of this family.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the help text of this family.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Returns the declared label names of this family.
    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Returns the descriptor shared by every primitive of this family.
    pub fn descriptor(&self) -> &M::Descriptor {
        &self.descriptor
    }

    /// Returns the number of label value tuples currently in this family.
    pub fn len(&self) -> usize {
        self.metrics.load().insertion_order.len()
    }

    /// Returns `true` if no label value tuple was requested yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the primitive addressed by `values`, creating it on first
    /// access.
    ///
    /// All callers requesting the same tuple observe the same instance,
    /// racing first-time callers included. The returned handle stays valid
    /// for the life of the family no matter how many other tuples are
    /// inserted later, so it may be cached.
    ///
    /// # Panics
    ///
    /// The number of values must equal the number of declared label names;
    /// a mismatch is a bug in the instrumenting application.
    pub fn labels(&self, values: &[&str]) -> M {
        self.with_label_values(LabelValues::from(values))
    }

    /// Like [`labels`](MetricFamily::labels), for an already-built tuple.
    ///
    /// # Panics
    ///
    /// The tuple length must equal the number of declared label names.
    pub fn with_label_values(&self, values: LabelValues) -> M {
        assert_eq!(
            values.len(),
            self.label_names.len(),
            "label arity mismatch for metric {:?}",
            self.name
        );
        if let Some(metric) = self.metrics.load().by_labels.get(&values) {
            return metric.clone();
        }

        self.metrics.update(|instances| {
            if instances.by_labels.contains_key(&values) {
                // Another thread won the race for this tuple.
                return instances.clone();
            }
            let mut instances = instances.clone();
            let metric = M::with_descriptor(values.clone(), &self.descriptor);
            instances.insertion_order.push(metric.clone());
            instances.by_labels.insert(values.clone(), metric);
            instances
        });
        self.metrics
            .load()
            .by_labels
            .get(&values)
            .cloned()
            .expect("Never fails")
    }
}
impl<M: Metric> Collect for MetricFamily<M> {
    fn collect(&self) -> Vec<Family> {
        let instances = self.metrics.load();
        let mut samples = Vec::new();
        for metric in &instances.insertion_order {
            metric.append_samples(&self.name, &self.label_names, &mut samples);
        }
        vec![Family {
            name: self.name.clone(),
            help: self.help.clone(),
            kind: M::kind(),
            samples,
        }]
    }
}

/// The copy-on-write payload: the lookup map plus an explicit insertion
/// order list so collection output is deterministic across runs.
#[derive(Debug, Clone)]
struct Instances<M> {
    by_labels: HashMap<LabelValues, M>,
    insertion_order: Vec<M>,
}
impl<M> Instances<M> {
    fn new() -> Self {
        Instances {
            by_labels: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::metrics::{Counter, Histogram, HistogramDescriptor};

    fn counters(label_names: &[&str]) -> CounterFamily {
        track_try_unwrap!(MetricFamily::new("requests_total", label_names, "Requests", ()))
    }

    #[test]
    fn one_instance_per_tuple() {
        let family = counters(&["method"]);

        let a = family.labels(&["GET"]);
        let b = family.labels(&["GET"]);
        let c = family.labels(&["PUT"]);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(family.len(), 2);
    }

    #[test]
    fn cached_handles_survive_later_insertions() {
        let family = counters(&["method"]);
        let cached = family.labels(&["GET"]);
        cached.inc();

        for i in 0..100 {
            let method = format!("method_{}", i);
            family.labels(&[method.as_str()]).inc();
        }
        assert!(cached.ptr_eq(&family.labels(&["GET"])));
        assert_eq!(cached.value(), 1.0);
    }

    #[test]
    fn racing_creators_collapse_to_one_winner() {
        let family = Arc::new(counters(&["worker"]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let family = Arc::clone(&family);
                thread::spawn(move || family.labels(&["shared"]))
            })
            .collect();
        let counters: Vec<Counter> = handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect();

        for counter in &counters {
            assert!(counter.ptr_eq(&counters[0]));
        }
        assert_eq!(family.len(), 1);
    }

    #[test]
    fn collect_uses_insertion_order() {
        let family = counters(&["animal", "color"]);
        family.labels(&["cat", "white"]).inc();
        family.labels(&["bird", "blue"]).inc();
        family.labels(&["cat", "black"]).inc();

        let families = family.collect();
        assert_eq!(families.len(), 1);
        let tuples: Vec<Vec<&str>> = families[0]
            .samples
            .iter()
            .map(|s| s.label_values.iter().collect())
            .collect();
        assert_eq!(
            tuples,
            [
                ["cat", "white"],
                ["bird", "blue"],
                ["cat", "black"],
            ]
        );
    }

    #[test]
    #[should_panic]
    fn arity_mismatch_is_rejected() {
        let family = counters(&["animal", "color"]);
        family.labels(&["cat"]);
    }

    #[test]
    fn names_are_validated() {
        assert!(MetricFamily::<Counter>::new("9foo", &[], "", ()).is_err());
        assert!(MetricFamily::<Counter>::new("foo", &["__x"], "", ()).is_err());
        assert!(MetricFamily::<Counter>::new("_foo:bar9", &["x"], "", ()).is_ok());

        // `le` is reserved for histogram families only.
        let descriptor = track_try_unwrap!(HistogramDescriptor::new(vec![1.0]));
        assert!(MetricFamily::<Histogram>::new("foo", &["le"], "", descriptor).is_err());
        assert!(MetricFamily::<Counter>::new("foo", &["le"], "", ()).is_ok());
    }
}
