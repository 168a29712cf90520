//! Minimal metrics registry for the prediction API.
//!
//! No external dependencies are used; the counter and histogram are plain
//! atomics rendered on demand in Prometheus text exposition format. Histogram
//! buckets and the running sum are kept in nanoseconds so observations never
//! touch floating point; conversion to seconds happens only at render time.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Prometheus sample formatting (`3.0`, `0.005`, `1.2067e-05`, `1e+16`, `+Inf`).
///
/// Shortest round-trip digits; exponents carry a sign and at least two digits.
pub fn fmt_sample(v: f64) -> String {
    if v.is_infinite() {
        return if v > 0.0 { "+Inf".into() } else { "-Inf".into() };
    }
    let s = format!("{v:?}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

#[derive(Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} counter");
        let _ = writeln!(out, "{name} {}", fmt_sample(self.get() as f64));
    }
}

// Default Prometheus buckets, in nanoseconds:
// 5ms, 10ms, 25ms, 50ms, 75ms, 100ms, 250ms, 500ms, 750ms, 1s, 2.5s, 5s, 7.5s, 10s
const BUCKETS_NANOS: [u64; 14] = [
    5_000_000,
    10_000_000,
    25_000_000,
    50_000_000,
    75_000_000,
    100_000_000,
    250_000_000,
    500_000_000,
    750_000_000,
    1_000_000_000,
    2_500_000_000,
    5_000_000_000,
    7_500_000_000,
    10_000_000_000,
];

pub struct Histogram {
    count: AtomicU64,
    sum_nanos: AtomicU64,
    buckets: [AtomicU64; BUCKETS_NANOS.len()],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

impl Histogram {
    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_nanos.fetch_add(nanos, Ordering::Relaxed);

        // Cumulative: every bucket whose bound covers the value.
        for (i, &b) in BUCKETS_NANOS.iter().enumerate() {
            if nanos <= b {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Sum of all observations.
    pub fn sum(&self) -> Duration {
        Duration::from_nanos(self.sum_nanos.load(Ordering::Relaxed))
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} histogram");

        for (i, &le) in BUCKETS_NANOS.iter().enumerate() {
            let c = self.buckets[i].load(Ordering::Relaxed);
            let le = fmt_sample(Duration::from_nanos(le).as_secs_f64());
            let _ = writeln!(out, "{name}_bucket{{le=\"{le}\"}} {}", fmt_sample(c as f64));
        }
        let count = self.count();
        let _ = writeln!(out, "{name}_bucket{{le=\"+Inf\"}} {}", fmt_sample(count as f64));
        let _ = writeln!(out, "{name}_count {}", fmt_sample(count as f64));
        let _ = writeln!(out, "{name}_sum {}", fmt_sample(self.sum().as_secs_f64()));
    }
}

/// Observes the elapsed time into a histogram exactly once, when dropped.
///
/// Hold it for the duration of the timed region; early returns and `?` paths
/// are covered because drop runs on every exit.
#[must_use = "the timer records when dropped; binding it to `_` drops it immediately"]
pub struct LatencyTimer<'a> {
    hist: &'a Histogram,
    start: Instant,
}

impl LatencyTimer<'_> {
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LatencyTimer<'_> {
    fn drop(&mut self) {
        self.hist.observe(self.start.elapsed());
    }
}

/// Registry for the prediction API. Constructed once at startup and shared
/// through `AppState`.
#[derive(Default)]
pub struct ApiMetrics {
    requests: Counter,
    latency: Histogram,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_request_count(&self) {
        self.requests.inc();
    }

    pub fn observe_latency(&self, elapsed: Duration) {
        self.latency.observe(elapsed);
    }

    /// Start timing a request; latency is recorded when the guard drops.
    pub fn start_latency_timer(&self) -> LatencyTimer<'_> {
        LatencyTimer { hist: &self.latency, start: Instant::now() }
    }

    pub fn request_count(&self) -> u64 {
        self.requests.get()
    }

    pub fn latency_count(&self) -> u64 {
        self.latency.count()
    }

    /// Render all registered metrics. Always reflects current state.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.requests.render("api_requests_total", "Total number of API requests", &mut out);
        self.latency.render("api_request_latency_seconds", "Request latency in seconds", &mut out);
        out
    }
}
