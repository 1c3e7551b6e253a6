//! Per-model readiness and metadata endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tensorport_core::ModelMetadata;

/// `GET /v2/models/{model_name}/ready`
pub async fn model_ready(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
) -> Result<Response, ApiError> {
    ready_response(&state, &model_name, None).await
}

/// `GET /v2/models/{model_name}/versions/{model_version}/ready`
pub async fn model_version_ready(
    State(state): State<AppState>,
    Path((model_name, model_version)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    ready_response(&state, &model_name, Some(&model_version)).await
}

async fn ready_response(
    state: &AppState,
    name: &str,
    version: Option<&str>,
) -> Result<Response, ApiError> {
    let ready = state.data_plane.model_ready(name, version).await?;
    if ready {
        Ok(StatusCode::OK.into_response())
    } else {
        Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("model '{name}' is not ready") })),
        )
            .into_response())
    }
}

/// `GET /v2/models/{model_name}`
pub async fn model_metadata(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
) -> Result<Json<ModelMetadata>, ApiError> {
    let metadata = state.data_plane.model_metadata(&model_name, None).await?;
    Ok(Json(metadata))
}

/// `GET /v2/models/{model_name}/versions/{model_version}`
pub async fn model_version_metadata(
    State(state): State<AppState>,
    Path((model_name, model_version)): Path<(String, String)>,
) -> Result<Json<ModelMetadata>, ApiError> {
    let metadata = state
        .data_plane
        .model_metadata(&model_name, Some(&model_version))
        .await?;
    Ok(Json(metadata))
}
