use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Converts a duration into fractional seconds.
pub fn duration_to_seconds(duration: Duration) -> f64 {
    duration.as_secs() as f64 + f64::from(duration.subsec_nanos()) / 1_000_000_000.0
}

/// Returns the current wall-clock time as seconds since the unix epoch.
pub fn unixtime_seconds() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration_to_seconds(duration),
        Err(e) => -duration_to_seconds(e.duration()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn duration_to_seconds_works() {
        assert_eq!(duration_to_seconds(Duration::from_millis(1500)), 1.5);
        assert_eq!(duration_to_seconds(Duration::from_secs(2)), 2.0);
    }
}
