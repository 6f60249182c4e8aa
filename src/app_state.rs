//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the content
//! repository, the metrics implementation and the site settings.
//!
//! The state is cheaply cloneable (everything heavy sits behind an `Arc`)
//! so it can be handed to each request handler without copying resources.

use crate::config::SiteConfig;
use crate::domain::{MetricsPtr, RepositoryPtr};
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
/// Handlers depend on the `Repository` and `Metrics` abstractions, never on
/// PostgreSQL or Prometheus directly, which lets tests substitute in-memory
/// implementations and isolated registries.
///
/// # Lifecycle
///
/// 1. Created once in `build_router()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub(crate) struct AppState {
    /// Metrics implementation rendered by `/metrics`.
    ///
    /// The same instance is handed to the route instrumentation layers.
    metrics: MetricsPtr,

    /// Repository abstraction for portfolio sections and entries.
    repository: RepositoryPtr,

    /// Title and homepage settings.
    site: Arc<SiteConfig>,
}

impl AppState {
    // ---

    pub fn new(metrics: MetricsPtr, repository: RepositoryPtr, site: SiteConfig) -> Self {
        // ---
        AppState {
            metrics,
            repository,
            site: Arc::new(site),
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// Get the site settings.
    pub(crate) fn site(&self) -> &SiteConfig {
        // ---
        &self.site
    }
}
