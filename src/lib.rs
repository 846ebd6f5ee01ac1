//! Client library for exposing [prometheus][prometheus] metrics.
//!
//! Metrics are organized into families: a family owns a name, a help text and a
//! fixed list of label names, and lazily creates one primitive (counter, gauge
//! or histogram) per distinct label value tuple. Families and any external
//! metrics source implement [`Collect`], and a [`Registry`] turns the snapshots
//! of all registered collectors into the text exposition format.
//!
//! [prometheus]: https://prometheus.io/
//!
//! # Examples
//!
//! ```
//! use promfam::Registry;
//!
//! # fn main() -> promfam::Result<()> {
//! let registry = Registry::new();
//! let animals_seen =
//!     registry.counter_family("animals_seen_total", &["animal", "color"], "Number of animals seen")?;
//!
//! animals_seen.labels(&["cat", "white"]).inc();
//!
//! // Handles may be cached and used from any thread.
//! let blue_bird_seen = animals_seen.labels(&["bird", "blue"]);
//! blue_bird_seen.inc();
//!
//! println!("{}", registry.serialize());
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - [Data model](https://prometheus.io/docs/concepts/data_model/)
//! - [Metric types](https://prometheus.io/docs/concepts/metric_types/)
//! - [Writing client libraries](https://prometheus.io/docs/instrumenting/writing_clientlibs/)
//! - [Exposition formats](https://prometheus.io/docs/instrumenting/exposition_formats/)
#![warn(missing_docs)]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate trackable;

pub use crate::collect::Collect;
pub use crate::error::{Error, ErrorKind};
pub use crate::family::{CounterFamily, GaugeFamily, HistogramFamily, Metric, MetricFamily};
pub use crate::metric::{Family, MetricKind, Sample};
pub use crate::registry::{default_registry, Registry};

pub mod bucket;
pub mod format;
pub mod label;
pub mod metrics;

mod atomic;
mod collect;
mod error;
mod family;
mod metric;
mod registry;
mod timestamp;

/// This crate specific `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
