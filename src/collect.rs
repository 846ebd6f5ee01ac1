use crate::metric::Family;

/// This trait allows to collect metrics from any source.
///
/// A collector exposes a point-in-time snapshot of zero or more metric
/// families. [`MetricFamily`](crate::MetricFamily) implements it, and so can
/// any user-defined source (e.g., a process metrics reader). The registry
/// treats every collector identically and never inspects how the snapshot
/// was obtained.
///
/// A collector is free to omit a family from its snapshot, e.g. when the
/// underlying source is temporarily unreadable.
pub trait Collect {
    /// Returns the current snapshot of every family this collector exposes.
    fn collect(&self) -> Vec<Family>;
}
