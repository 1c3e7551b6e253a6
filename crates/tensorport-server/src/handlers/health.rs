//! Liveness and readiness probes.
//!
//! `GET /v2/health/live`  — 200 once the process accepts traffic.
//! `GET /v2/health/ready` — 200 iff every registered model is Ready
//! (an empty registry is ready); 503 otherwise.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

pub async fn live() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.data_plane.ready().await {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "one or more models are not ready" })),
        )
            .into_response()
    }
}

/// `GET /v2` — static server metadata. Never fails.
pub async fn server_metadata(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.data_plane.server_metadata())
}
