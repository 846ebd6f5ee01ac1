//! Metric primitives.
pub use self::counter::Counter;
pub use self::gauge::{Gauge, GaugeTimer, InProgressGuard};
pub use self::histogram::{Histogram, HistogramDescriptor, HistogramTimer};
pub use self::process::ProcessMetricsCollector;

mod counter;
mod gauge;
mod histogram;
mod process;
