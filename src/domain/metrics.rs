use std::sync::Arc;
use std::time::Instant;

/// Abstraction for application metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record one completed HTTP request.
    ///
    /// Adds the elapsed time since `start` to the duration histogram for
    /// `(path, method)` and increments the request counter for
    /// `(path, method, status)`.
    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
