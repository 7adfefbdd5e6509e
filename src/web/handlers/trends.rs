// GET /api/trends and /api/monthly — the chart-driving count maps.
//
// /api/monthly backs the dashboard's topic dropdown: selecting a topic is
// a pure lookup into the precomputed monthly map, never a recomputation.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

/// GET /api/trends — yearly counts per topic plus the share-of-total slices.
pub async fn get_trends(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "topic_trends": &state.summary.topic_trends,
        "topic_distribution": &state.summary.topic_distribution,
    }))
}

#[derive(Deserialize, Default)]
pub struct MonthlyQuery {
    pub topic: Option<String>,
}

/// GET /api/monthly?topic=X — one topic's monthly series.
pub async fn get_monthly(
    State(state): State<AppState>,
    Query(params): Query<MonthlyQuery>,
) -> Response {
    let Some(topic) = params.topic else {
        return api_error(StatusCode::BAD_REQUEST, "Missing required query parameter: topic");
    };

    match state.summary.monthly_trends.get(&topic) {
        Some(series) => Json(serde_json::json!({
            "topic": topic,
            "series": series,
        }))
        .into_response(),
        None => api_error(StatusCode::NOT_FOUND, &format!("Unknown topic: {topic}")),
    }
}
