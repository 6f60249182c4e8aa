//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the `prometheus` crate. Every instance owns its own [`Registry`], which is
//! handed in at construction time instead of living in a global. Tests build
//! an isolated instance per case and read the series back directly.
//!
//! Two series families are maintained:
//! - `http_requests_total{path, method, status}` (counter)
//! - `http_request_duration_seconds{path, method}` (histogram, default buckets)

use crate::domain::Metrics;
use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Instant;

const REQUESTS_TOTAL: &str = "http_requests_total";
const REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Prometheus-based metrics implementation.
///
/// The vectors hold their children behind atomics and a read-write lock,
/// so concurrent requests can record without external synchronization.
pub struct PrometheusMetrics {
    // ---
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl PrometheusMetrics {
    // ---
    /// Creates an instance backed by a fresh, private registry.
    pub fn new() -> Result<Self> {
        // ---
        Self::with_registry(Registry::new())
    }

    /// Creates an instance that registers its series into `registry`.
    ///
    /// # Errors
    /// Fails if the registry already holds series with the same names.
    pub fn with_registry(registry: Registry) -> Result<Self> {
        // ---
        tracing::info!("Creating Prometheus metrics");

        let requests_total = IntCounterVec::new(
            Opts::new(REQUESTS_TOTAL, "Total number of HTTP requests"),
            &["path", "method", "status"],
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, "Duration of HTTP requests")
                .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
            &["path", "method"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
        })
    }

    /// Current value of the request counter for `(path, method, status)`.
    pub fn request_count(&self, path: &str, method: &str, status: u16) -> u64 {
        // ---
        let status = status.to_string();
        self.requests_total
            .get_metric_with_label_values(&[path, method, status.as_str()])
            .map(|counter| counter.get())
            .unwrap_or(0)
    }

    /// Number of duration observations and their sum (seconds) for `(path, method)`.
    pub fn duration_summary(&self, path: &str, method: &str) -> (u64, f64) {
        // ---
        self.request_duration
            .get_metric_with_label_values(&[path, method])
            .map(|histogram| (histogram.get_sample_count(), histogram.get_sample_sum()))
            .unwrap_or((0, 0.0))
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        // ---
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(err) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {err}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        // ---
        let elapsed = start.elapsed().as_secs_f64();
        tracing::debug!(path, method, status, elapsed, "Recording HTTP request");

        match self
            .request_duration
            .get_metric_with_label_values(&[path, method])
        {
            Ok(histogram) => histogram.observe(elapsed),
            Err(err) => tracing::warn!("Dropping duration sample for {method} {path}: {err}"),
        }

        let status = status.to_string();
        match self
            .requests_total
            .get_metric_with_label_values(&[path, method, status.as_str()])
        {
            Ok(counter) => counter.inc(),
            Err(err) => tracing::warn!("Dropping request count for {method} {path}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn records_one_count_and_one_observation() {
        // ---
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_http_request(Instant::now(), "/", "GET", 200);

        assert_eq!(metrics.request_count("/", "GET", 200), 1);
        assert_eq!(metrics.duration_summary("/", "GET").0, 1);
        assert_eq!(metrics.request_count("/", "GET", 500), 0);
    }

    #[test]
    fn status_is_part_of_the_counter_key_only() {
        // ---
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_http_request(Instant::now(), "/api/data", "GET", 200);
        metrics.record_http_request(Instant::now(), "/api/data", "GET", 500);

        assert_eq!(metrics.request_count("/api/data", "GET", 200), 1);
        assert_eq!(metrics.request_count("/api/data", "GET", 500), 1);
        assert_eq!(metrics.duration_summary("/api/data", "GET").0, 2);
    }

    #[test]
    fn elapsed_time_is_recorded_in_seconds() {
        // ---
        let metrics = PrometheusMetrics::new().unwrap();
        let start = Instant::now() - Duration::from_millis(250);
        metrics.record_http_request(start, "/", "GET", 200);

        let (count, sum) = metrics.duration_summary("/", "GET");
        assert_eq!(count, 1);
        assert!(sum >= 0.25, "expected at least 0.25s, got {sum}");
        assert!(sum < 60.0, "duration should be seconds, got {sum}");
    }

    #[test]
    fn render_uses_text_exposition_format() {
        // ---
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_http_request(Instant::now(), "/", "GET", 404);

        let text = metrics.render();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
        let series = text
            .lines()
            .find(|line| line.starts_with("http_requests_total{"))
            .expect("counter series present");
        assert!(series.contains(r#"path="/""#));
        assert!(series.contains(r#"method="GET""#));
        assert!(series.contains(r#"status="404""#));
        assert!(series.ends_with(" 1"));
        assert!(text.contains("http_request_duration_seconds_bucket"));
    }

    #[test]
    fn registries_are_isolated() {
        // ---
        let first = PrometheusMetrics::new().unwrap();
        let second = PrometheusMetrics::new().unwrap();
        first.record_http_request(Instant::now(), "/", "GET", 200);

        assert_eq!(first.request_count("/", "GET", 200), 1);
        assert_eq!(second.request_count("/", "GET", 200), 0);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        // ---
        let registry = Registry::new();
        let _first = PrometheusMetrics::with_registry(registry.clone()).unwrap();
        assert!(PrometheusMetrics::with_registry(registry).is_err());
    }

    #[test]
    fn concurrent_recording_loses_no_updates() {
        // ---
        let metrics = Arc::new(PrometheusMetrics::new().unwrap());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        metrics.record_http_request(Instant::now(), "/", "GET", 200);
                    }
                })
            })
            .collect();
        for handle in threads {
            handle.join().unwrap();
        }

        assert_eq!(metrics.request_count("/", "GET", 200), 2000);
        assert_eq!(metrics.duration_summary("/", "GET").0, 2000);
    }
}
