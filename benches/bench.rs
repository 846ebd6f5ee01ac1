use criterion::{criterion_group, criterion_main, Criterion};

use promfam::bucket;
use promfam::Registry;

fn bench_primitives(c: &mut Criterion) {
    let registry = Registry::new();
    let counter = registry.counter("bench_total", "").unwrap();
    c.bench_function("counter_inc", |b| b.iter(|| counter.inc()));
    c.bench_function("counter_inc_by_float", |b| b.iter(|| counter.inc_by(3.3)));

    let gauge = registry.gauge("bench_gauge", "").unwrap();
    c.bench_function("gauge_set", |b| b.iter(|| gauge.set(3.3)));

    let histogram = registry
        .histogram("bench_seconds", bucket::linear_buckets(0.0, 1.0, 10), "")
        .unwrap();
    c.bench_function("histogram_observe", |b| b.iter(|| histogram.observe(3.3)));
}

fn bench_family_lookup(c: &mut Criterion) {
    let registry = Registry::new();
    let family = registry
        .counter_family("lookup_total", &["method", "status"], "")
        .unwrap();
    family.labels(&["GET", "200"]).inc();
    c.bench_function("family_labels_hit", |b| {
        b.iter(|| family.labels(&["GET", "200"]))
    });
}

fn bench_serialize(c: &mut Criterion) {
    let registry = Registry::new();
    let family = registry
        .counter_family("requests_total", &["method"], "Requests")
        .unwrap();
    for &method in &["GET", "PUT", "POST", "DELETE"] {
        family.labels(&[method]).inc();
    }
    c.bench_function("registry_serialize", |b| b.iter(|| registry.serialize()));
}

criterion_group!(
    benches,
    bench_primitives,
    bench_family_lookup,
    bench_serialize
);
criterion_main!(benches);
