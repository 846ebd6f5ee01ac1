//! Collected metric snapshots.
//!
//! These types carry the point-in-time state a [`Collect`](crate::Collect)
//! implementation hands to the serializer. They are rebuilt on every
//! collection pass and never cached.
use std::fmt;

use crate::label::LabelValues;

/// Metric kind.
///
/// # References
///
/// - [Metric types](https://prometheus.io/docs/concepts/metric_types/)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}
impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MetricKind::Counter => write!(f, "counter"),
            MetricKind::Gauge => write!(f, "gauge"),
            MetricKind::Histogram => write!(f, "histogram"),
        }
    }
}

/// One exposition line: a metric name, a numeric value and the label pairs
/// addressing it.
///
/// Histograms decompose into several samples per label tuple (`_bucket` lines
/// with a synthetic `le` label, plus `_sum` and `_count`).
#[derive(Debug, Clone)]
pub struct Sample {
    /// The full sample name, including any `_bucket`/`_sum`/`_count` suffix.
    pub name: String,

    /// The sampled value.
    pub value: f64,

    /// Label names, positionally paired with `label_values`.
    pub label_names: Vec<String>,

    /// Label values, positionally paired with `label_names`.
    pub label_values: LabelValues,
}

/// A collected metric family: the declaration shared by all samples of one
/// metric, plus the samples themselves.
#[derive(Debug, Clone)]
pub struct Family {
    /// The family name.
    pub name: String,

    /// The help text; empty means "emit no HELP line".
    pub help: String,

    /// The family kind.
    pub kind: MetricKind,

    /// The samples of every primitive in this family.
    pub samples: Vec<Sample>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(MetricKind::Counter.to_string(), "counter");
        assert_eq!(MetricKind::Gauge.to_string(), "gauge");
        assert_eq!(MetricKind::Histogram.to_string(), "histogram");
    }
}
