//! Inference endpoint.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use tensorport_core::{InferenceRequest, InferenceResponse, ServeError};

/// `POST /v2/models/{model_name}/infer`
pub async fn infer(
    State(state): State<AppState>,
    Path(model_name): Path<String>,
    payload: Result<Json<InferenceRequest>, JsonRejection>,
) -> Result<Json<InferenceResponse>, ApiError> {
    run_infer(&state, &model_name, None, payload).await
}

/// `POST /v2/models/{model_name}/versions/{model_version}/infer`
pub async fn infer_version(
    State(state): State<AppState>,
    Path((model_name, model_version)): Path<(String, String)>,
    payload: Result<Json<InferenceRequest>, JsonRejection>,
) -> Result<Json<InferenceResponse>, ApiError> {
    run_infer(&state, &model_name, Some(&model_version), payload).await
}

async fn run_infer(
    state: &AppState,
    name: &str,
    version: Option<&str>,
    payload: Result<Json<InferenceRequest>, JsonRejection>,
) -> Result<Json<InferenceResponse>, ApiError> {
    // A body that fails deserialization gets the same error shape as
    // every other failure, not axum's default rejection.
    let Json(request) =
        payload.map_err(|e| ServeError::InvalidInput(format!("malformed request body: {e}")))?;

    let response = state.data_plane.infer(name, version, request).await?;
    Ok(Json(response))
}
