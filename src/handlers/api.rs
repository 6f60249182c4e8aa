use crate::app_state::AppState;
use crate::domain::Entry;
use axum::{extract::State, http::StatusCode, Json};

/// Handler for the JSON content API (GET /api/data).
///
/// Returns every stored entry, newest first, as a JSON array of
/// `{ "id", "title", "content", "created" }` objects.
///
/// - `200 OK` with the array (empty when nothing is published).
/// - `500 Internal Server Error` if the query fails.
#[tracing::instrument(skip(state))]
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, StatusCode> {
    // ---
    let entries = state.repository().list_entries(None).await.map_err(|err| {
        tracing::error!("Failed to load entries: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(entries))
}
