mod prometheus_metrics;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

/// Creates a new Prometheus metrics implementation.
///
/// Each call builds its own registry, so independent instances never
/// share series. The application creates exactly one at startup.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");

    Ok(Arc::new(PrometheusMetrics::new()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_returns_valid_metrics() {
        let result = create();
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_twice_does_not_collide() {
        // A process-global registry would reject the second registration.
        assert!(create().is_ok());
        assert!(create().is_ok());
    }
}
