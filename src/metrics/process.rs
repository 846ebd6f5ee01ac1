use std::time::SystemTime;
#[cfg(target_os = "linux")]
use std::time::UNIX_EPOCH;

use crate::collect::Collect;
use crate::metric::Family;
#[cfg(target_os = "linux")]
use crate::label::LabelValues;
#[cfg(target_os = "linux")]
use crate::metric::{MetricKind, Sample};

#[cfg(target_os = "linux")]
lazy_static! {
    static ref CLK_TCK: f64 = unsafe { libc::sysconf(libc::_SC_CLK_TCK) as f64 };
    static ref PAGESIZE: usize = unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize };
}

/// Process metrics collector.
///
/// Reads the standard `process_*` metrics of the calling process from
/// `/proc`. Collection is best-effort per metric: a family whose source
/// cannot be read is omitted from the snapshot without affecting the
/// others.
///
/// # Notice
///
/// On non Linux platforms, the `collect` method always returns an empty
/// snapshot.
///
/// # References
///
/// - [Process metrics](https://prometheus.io/docs/instrumenting/writing_clientlibs/#process-metrics)
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use promfam::default_registry;
/// use promfam::metrics::ProcessMetricsCollector;
///
/// default_registry()
///     .register(Arc::new(ProcessMetricsCollector::new()))
///     .unwrap();
/// let _text = default_registry().serialize();
/// ```
#[derive(Debug)]
pub struct ProcessMetricsCollector {
    start_time: SystemTime,
}
impl ProcessMetricsCollector {
    /// Makes a new `ProcessMetricsCollector` instance.
    pub fn new() -> Self {
        ProcessMetricsCollector {
            start_time: SystemTime::now(),
        }
    }
}
impl Default for ProcessMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
impl Collect for ProcessMetricsCollector {
    #[cfg(target_os = "linux")]
    fn collect(&self) -> Vec<Family> {
        let mut families = Vec::new();

        if let Ok(stat) = procinfo::pid::stat_self() {
            families.push(family(
                "process_cpu_seconds_total",
                "Total user and system CPU time spent in seconds.",
                MetricKind::Counter,
                (stat.utime + stat.stime) as f64 / *CLK_TCK,
            ));
            families.push(family(
                "process_virtual_memory_bytes",
                "Virtual memory size in bytes.",
                MetricKind::Gauge,
                stat.vsize as f64,
            ));
            families.push(family(
                "process_resident_memory_bytes",
                "Resident memory size in bytes.",
                MetricKind::Gauge,
                (stat.rss * *PAGESIZE) as f64,
            ));
            families.push(family(
                "process_threads",
                "Number of OS threads in the process.",
                MetricKind::Gauge,
                f64::from(stat.num_threads),
            ));
        }
        if let Ok(status) = procinfo::pid::status_self() {
            families.push(family(
                "process_open_fds",
                "Number of open file descriptors.",
                MetricKind::Gauge,
                f64::from(status.fd_allocated),
            ));
        }
        if let Ok(limits) = procinfo::pid::limits_self() {
            if let Some(fds) = limits.max_open_files.soft {
                families.push(family(
                    "process_max_fds",
                    "Maximum number of open file descriptors.",
                    MetricKind::Gauge,
                    fds as f64,
                ));
            }
            if let Some(bytes) = limits.max_address_space.soft {
                families.push(family(
                    "process_virtual_memory_max_bytes",
                    "Maximum amount of virtual memory available in bytes.",
                    MetricKind::Gauge,
                    bytes as f64,
                ));
            }
        }
        if let Ok(start_time) = self.start_time.duration_since(UNIX_EPOCH) {
            families.push(family(
                "process_start_time_seconds",
                "Start time of the process since the unix epoch in seconds.",
                MetricKind::Gauge,
                start_time.as_secs() as f64,
            ));
        }

        families
    }

    #[cfg(not(target_os = "linux"))]
    fn collect(&self) -> Vec<Family> {
        Vec::new()
    }
}

#[cfg(target_os = "linux")]
fn family(name: &str, help: &str, kind: MetricKind, value: f64) -> Family {
    Family {
        name: name.to_string(),
        help: help.to_string(),
        kind,
        samples: vec![Sample {
            name: name.to_string(),
            value,
            label_names: Vec::new(),
            label_values: LabelValues::default(),
        }],
    }
}
