use crate::app_state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Handler for the scrape endpoint (GET /metrics).
///
/// Serves the request counter and duration histogram in the Prometheus
/// text exposition format. The no-op backend yields an empty body.
/// This route is not instrumented, so scrapes never show up in the series
/// they read.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        state.metrics().render(),
    )
}
