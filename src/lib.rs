// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{routing::get, Router};

use handlers::{health_check, home_handler, list_entries, metrics_handler};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod content;
mod handlers;
mod infrastructure;
mod middleware;

pub use config::*;
pub use content::{default_sections, seed_default_content};
pub use middleware::{InstrumentLayer, Instrumented};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_postgres_repository,
    create_prom_metrics,
    ensure_schema,
    init_database_with_retry,
    NoopMetrics,
    PrometheusMetrics,
};

use domain::{MetricsPtr, RepositoryPtr};

/// Build the complete application from loaded configuration.
///
/// Connects to PostgreSQL (with retry), ensures the schema, seeds default
/// content when enabled and wires the router.
pub async fn create_app(config: &AppConfig) -> Result<Router> {
    // ---
    let metrics = match config.metrics.backend {
        MetricsBackend::Prometheus => create_prom_metrics()?,
        MetricsBackend::Noop => create_noop_metrics()?,
    };

    let pool = init_database_with_retry(&config.database).await?;
    let repository = create_postgres_repository(pool);

    if config.site.seed_content {
        seed_default_content(&repository).await;
    }

    Ok(build_router(metrics, repository, config.site.clone()))
}

/// Build the HTTP router around already constructed dependencies.
///
/// Every content route is wrapped in an [`InstrumentLayer`] sharing the
/// given metrics instance; `/metrics` renders that same instance.
pub fn build_router(metrics: MetricsPtr, repository: RepositoryPtr, site: SiteConfig) -> Router {
    // ---
    let instrument = |path: &str| InstrumentLayer::new(path, metrics.clone());

    let app_state = AppState::new(metrics.clone(), repository, site);

    Router::new()
        .route("/", get(home_handler).layer(instrument("/")))
        .route("/api/data", get(list_entries).layer(instrument("/api/data")))
        .route("/health", get(health_check).layer(instrument("/health")))
        .route("/metrics", get(metrics_handler))
        .with_state(app_state)
}
