//! Lightweight in-process metrics (dependency-free).
//!
//! The request counter and latency histogram are stored as atomics and
//! rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::{ApiMetrics, LatencyTimer};
