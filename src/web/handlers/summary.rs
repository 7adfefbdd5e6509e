// GET /api/summary and /api/metadata — the whole document, or just the
// headline numbers for the metric tiles.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

/// GET /api/summary — the complete aggregate document.
pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.summary.as_ref().clone())
}

/// GET /api/metadata — totals, date range, and insight block.
pub async fn get_metadata(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "metadata": &state.summary.metadata,
        "insights": &state.summary.insights,
    }))
}
