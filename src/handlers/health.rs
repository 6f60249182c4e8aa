use crate::app_state::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Responds with the health status of the server.
///
/// Pings the database on every call; the site cannot render anything
/// useful without it.
///
/// # Responses
/// - `200 OK` with `{ "status": "healthy" }` if the database answers.
/// - `503 SERVICE UNAVAILABLE` with `{ "status": "unhealthy" }` otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    // ---
    match state.repository().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "healthy" })),
        Err(err) => {
            tracing::warn!("Health check failed, database not connected: {err:#}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "unhealthy" }),
            )
        }
    }
}
