use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::collect::Collect;
use crate::family::{CounterFamily, GaugeFamily, HistogramFamily, MetricFamily};
use crate::format;
use crate::metric::Family;
use crate::metrics::{Counter, Gauge, Histogram, HistogramDescriptor};
use crate::{ErrorKind, Result};

lazy_static! {
    static ref DEFAULT_REGISTRY: Registry = Registry::new();
}

/// Returns the process-wide default registry.
///
/// The instance is lazily initialized on first use and lives for the rest of
/// the process; there is no teardown. It is a convenience only: every core
/// type also works with explicitly created [`Registry`] instances.
pub fn default_registry() -> Registry {
    DEFAULT_REGISTRY.clone()
}

/// A set of collectors, serialized together.
///
/// Registries are cheap to clone; clones share the same collector set.
/// Families built through the convenience constructors are registered
/// automatically and returned for direct mutation, so application code and
/// the scrape path share them without further coordination.
#[derive(Clone)]
pub struct Registry(Arc<Mutex<Inner>>);
impl Registry {
    /// Makes a new, empty `Registry` instance.
    pub fn new() -> Self {
        Registry(Arc::new(Mutex::new(Inner {
            collectors: Vec::new(),
            family_names: HashSet::new(),
        })))
    }

    /// Builds a counter family, registers it, and returns it.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidInput` on a malformed metric or label name, or if
    /// a family with this name is already registered.
    pub fn counter_family(
        &self,
        name: &str,
        label_names: &[&str],
        help: &str,
    ) -> Result<Arc<CounterFamily>> {
        let family = Arc::new(track!(MetricFamily::new(name, label_names, help, ()))?);
        track!(self.register_family(name, family.clone()))?;
        Ok(family)
    }

    /// Builds an unlabeled counter family, registers it, and returns its
    /// single counter.
    pub fn counter(&self, name: &str, help: &str) -> Result<Counter> {
        let family = track!(self.counter_family(name, &[], help))?;
        Ok(family.labels(&[]))
    }

    /// Builds a gauge family, registers it, and returns it.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidInput` on a malformed metric or label name, or if
    /// a family with this name is already registered.
    pub fn gauge_family(
        &self,
        name: &str,
        label_names: &[&str],
        help: &str,
    ) -> Result<Arc<GaugeFamily>> {
        let family = Arc::new(track!(MetricFamily::new(name, label_names, help, ()))?);
        track!(self.register_family(name, family.clone()))?;
        Ok(family)
    }

    /// Builds an unlabeled gauge family, registers it, and returns its
    /// single gauge.
    pub fn gauge(&self, name: &str, help: &str) -> Result<Gauge> {
        let family = track!(self.gauge_family(name, &[], help))?;
        Ok(family.labels(&[]))
    }

    /// Builds a histogram family with the given finite bucket bounds,
    /// registers it, and returns it.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidInput` on a malformed metric or label name,
    /// malformed bucket bounds, or if a family with this name is already
    /// registered.
    pub fn histogram_family(
        &self,
        name: &str,
        label_names: &[&str],
        bounds: Vec<f64>,
        help: &str,
    ) -> Result<Arc<HistogramFamily>> {
        let descriptor = track!(HistogramDescriptor::new(bounds))?;
        let family = Arc::new(track!(MetricFamily::new(name, label_names, help, descriptor))?);
        track!(self.register_family(name, family.clone()))?;
        Ok(family)
    }

    /// Builds an unlabeled histogram family, registers it, and returns its
    /// single histogram.
    pub fn histogram(&self, name: &str, bounds: Vec<f64>, help: &str) -> Result<Histogram> {
        let family = track!(self.histogram_family(name, &[], bounds, help))?;
        Ok(family.labels(&[]))
    }

    /// Registers an externally-owned collector.
    ///
    /// The registry shares ownership: the collector may also be held and
    /// driven by application code independently.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidInput` if this exact collector instance is
    /// already registered.
    pub fn register(&self, collector: Arc<dyn Collect + Send + Sync>) -> Result<()> {
        let mut inner = self.lock();
        let duplicate = inner
            .collectors
            .iter()
            .any(|c| Arc::ptr_eq(c, &collector));
        track_assert!(
            !duplicate,
            ErrorKind::InvalidInput,
            "collector registered twice"
        );
        inner.collectors.push(collector);
        Ok(())
    }

    /// Collects every registered collector, in registration order, and
    /// renders the concatenated snapshots into the text exposition format.
    pub fn serialize(&self) -> String {
        format::serialize(&self.gather())
    }

    /// Collects every registered collector, in registration order.
    pub fn gather(&self) -> Vec<Family> {
        let collectors = self.lock().collectors.clone();
        let mut families = Vec::new();
        for collector in &collectors {
            families.extend(collector.collect());
        }
        families
    }

    fn register_family(&self, name: &str, family: Arc<dyn Collect + Send + Sync>) -> Result<()> {
        let mut inner = self.lock();
        track_assert!(
            !inner.family_names.contains(name),
            ErrorKind::InvalidInput,
            "duplicate metric family name: {:?}",
            name
        );
        inner.family_names.insert(name.to_string());
        inner.collectors.push(family);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<Inner> {
        self.0.lock().expect("Never fails")
    }
}
impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

struct Inner {
    collectors: Vec<Arc<dyn Collect + Send + Sync>>,
    family_names: HashSet<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bucket;
    use crate::metric::{MetricKind, Sample};
    use crate::label::LabelValues;

    #[test]
    fn unlabeled_counter_serializes_verbatim() {
        let registry = Registry::new();
        let steps = track_try_unwrap!(registry.counter("steps_total", "Number of steps"));
        steps.inc();

        assert_eq!(
            registry.serialize(),
            "# HELP steps_total Number of steps\n# TYPE steps_total counter\nsteps_total 1\n\n"
        );
    }

    #[test]
    fn labeled_counter_serializes_in_declaration_order() {
        let registry = Registry::new();
        let animals = track_try_unwrap!(registry.counter_family(
            "animals_seen_total",
            &["animal", "color"],
            "Number of animals seen"
        ));
        animals.labels(&["cat", "white"]).inc();

        let text = registry.serialize();
        assert!(text.contains("animals_seen_total{animal=\"cat\",color=\"white\"} 1\n"));
    }

    #[test]
    fn histogram_decomposes_into_bucket_sum_count() {
        let registry = Registry::new();
        let hist = track_try_unwrap!(registry.histogram(
            "size_bytes",
            bucket::linear_buckets(0.0, 10.0, 5),
            ""
        ));
        hist.observe(7.0);
        hist.observe(12.0);
        hist.observe(50.1);
        hist.observe(10.0);

        assert_eq!(
            registry.serialize(),
            "# TYPE size_bytes histogram\n\
             size_bytes_bucket{le=\"0\"} 0\n\
             size_bytes_bucket{le=\"10\"} 2\n\
             size_bytes_bucket{le=\"20\"} 3\n\
             size_bytes_bucket{le=\"30\"} 3\n\
             size_bytes_bucket{le=\"40\"} 3\n\
             size_bytes_bucket{le=\"+Inf\"} 4\n\
             size_bytes_sum 79.1\n\
             size_bytes_count 4\n\
             \n"
        );
    }

    #[test]
    fn duplicate_family_names_are_rejected() {
        let registry = Registry::new();
        assert!(registry.counter("steps_total", "").is_ok());
        assert!(registry.counter("steps_total", "").is_err());
        assert!(registry.gauge("steps_total", "").is_err());
    }

    #[test]
    fn duplicate_collector_instances_are_rejected() {
        struct Still;
        impl Collect for Still {
            fn collect(&self) -> Vec<Family> {
                Vec::new()
            }
        }

        let registry = Registry::new();
        let collector = Arc::new(Still);
        assert!(registry.register(collector.clone()).is_ok());
        assert!(registry.register(collector).is_err());
        assert!(registry.register(Arc::new(Still)).is_ok());
    }

    #[test]
    fn collectors_serialize_in_registration_order() {
        struct Fixed(&'static str);
        impl Collect for Fixed {
            fn collect(&self) -> Vec<Family> {
                vec![Family {
                    name: self.0.to_string(),
                    help: String::new(),
                    kind: MetricKind::Gauge,
                    samples: vec![Sample {
                        name: self.0.to_string(),
                        value: 1.0,
                        label_names: Vec::new(),
                        label_values: LabelValues::default(),
                    }],
                }]
            }
        }

        let registry = Registry::new();
        track_try_unwrap!(registry.register(Arc::new(Fixed("bbb"))));
        track_try_unwrap!(registry.register(Arc::new(Fixed("aaa"))));

        assert_eq!(
            registry.serialize(),
            "# TYPE bbb gauge\nbbb 1\n\n# TYPE aaa gauge\naaa 1\n\n"
        );
    }

    #[test]
    fn default_registry_is_shared() {
        let a = default_registry();
        let b = default_registry();
        let name = "default_registry_smoke_total";
        track_try_unwrap!(a.counter(name, "")).inc();
        assert!(b.serialize().contains(name));
    }
}
