//! HTTP mapping for the data-plane error taxonomy.
//!
//! Every failure leaving the server carries the same body shape,
//! `{"error": "<message>"}`, paired with a status from the taxonomy.
//! Nothing below this layer knows about HTTP.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tensorport_core::ServeError;

/// Newtype bridging [`ServeError`] into an axum response.
#[derive(Debug)]
pub struct ApiError(pub ServeError);

impl From<ServeError> for ApiError {
    fn from(err: ServeError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ServeError::ModelNotFound(_) => StatusCode::NOT_FOUND,
            ServeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServeError::Inference(_) => StatusCode::BAD_REQUEST,
            ServeError::DuplicateModel(_) => StatusCode::CONFLICT,
            // Load failures are surfaced via readiness/metadata, never
            // through infer; reaching here means something internal.
            ServeError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
