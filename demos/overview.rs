extern crate promfam;

use promfam::bucket;
use promfam::Registry;

fn main() -> promfam::Result<()> {
    let registry = Registry::new();
    let animals_seen =
        registry.counter_family("animals_seen_total", &["animal", "color"], "Number of animals seen")?;
    let steps = registry.counter("steps_total", "Number of steps")?;
    let cpu_load = registry.gauge("cpu_load", "The CPU load")?;
    let durations = registry.histogram(
        "task_duration_seconds",
        bucket::default_buckets(),
        "Time taken to run a task",
    )?;

    animals_seen.labels(&["cat", "white"]).inc();

    // Handles may be cached.
    let blue_bird_seen = animals_seen.labels(&["bird", "blue"]);
    blue_bird_seen.inc();

    steps.inc();
    cpu_load.set(3.14159);
    for i in 0..6 {
        durations.observe(f64::from(i));
    }

    println!("{}", registry.serialize());
    Ok(())
}
