extern crate promfam;
#[macro_use]
extern crate trackable;

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;

use promfam::format::TEXT_CONTENT_TYPE;
use promfam::metrics::ProcessMetricsCollector;
use promfam::{default_registry, CounterFamily, HistogramFamily};
use promfam::metrics::Gauge;

// This is the most minimal and primitive "HTTP server" you could build.
// Do not use for real, please.
fn main() -> std::io::Result<()> {
    let registry = default_registry();
    track_try_unwrap!(registry.register(Arc::new(ProcessMetricsCollector::new())));

    let requests = track_try_unwrap!(registry.counter_family(
        "http_requests_total",
        &["path"],
        "Number of requests received"
    ));
    let durations = track_try_unwrap!(registry.histogram_family(
        "http_request_duration_seconds",
        &["path"],
        promfam::bucket::default_buckets(),
        "Time taken to serve a request"
    ));
    let in_flight = track_try_unwrap!(registry.gauge(
        "http_requests_in_flight",
        "Number of requests currently being served"
    ));

    let listener = TcpListener::bind("127.0.0.1:9100")?;
    eprintln!("serving metrics on http://127.0.0.1:9100/metrics");
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(e) = handle(stream, &requests, &durations, &in_flight) {
                    eprintln!("error serving request: {}", e);
                }
            }
            Err(e) => eprintln!("error accepting connection: {}", e),
        }
    }
    Ok(())
}

fn handle(
    mut stream: TcpStream,
    requests: &CounterFamily,
    durations: &HistogramFamily,
    in_flight: &Gauge,
) -> std::io::Result<()> {
    let _in_flight = in_flight.track_in_progress();
    let _timer = durations.labels(&["/metrics"]).timer();
    requests.labels(&["/metrics"]).inc();

    // Drain whatever request head fits into one read; the path is ignored
    // and every request is answered with the metrics page.
    let mut buf = [0; 4096];
    let _ = stream.read(&mut buf)?;

    let body = default_registry().serialize();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        TEXT_CONTENT_TYPE,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes())
}
