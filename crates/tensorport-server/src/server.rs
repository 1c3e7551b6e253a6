//! Axum binding for the V2 inference protocol.
//!
//! [`build_router`] wires the six data-plane operations to their HTTP
//! routes; [`InferenceServer`] binds the listener and serves.
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | `GET`  | `/v2` | server metadata |
//! | `GET`  | `/v2/health/live` | liveness |
//! | `GET`  | `/v2/health/ready` | server readiness |
//! | `GET`  | `/v2/models/{name}[/versions/{version}]/ready` | model readiness |
//! | `GET`  | `/v2/models/{name}[/versions/{version}]` | model metadata |
//! | `POST` | `/v2/models/{name}[/versions/{version}]/infer` | inference |

use crate::handlers::{health, infer, models};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tensorport_runtime::DataPlane;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the V2 router over a data plane.
pub fn build_router(data_plane: Arc<DataPlane>) -> Router {
    let state = AppState::new(data_plane);
    Router::new()
        .route("/v2", get(health::server_metadata))
        .route("/v2/health/live", get(health::live))
        .route("/v2/health/ready", get(health::ready))
        .route("/v2/models/{model_name}/ready", get(models::model_ready))
        .route(
            "/v2/models/{model_name}/versions/{model_version}/ready",
            get(models::model_version_ready),
        )
        .route("/v2/models/{model_name}", get(models::model_metadata))
        .route(
            "/v2/models/{model_name}/versions/{model_version}",
            get(models::model_version_metadata),
        )
        .route("/v2/models/{model_name}/infer", post(infer::infer))
        .route(
            "/v2/models/{model_name}/versions/{model_version}/infer",
            post(infer::infer_version),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server wrapping a [`DataPlane`].
pub struct InferenceServer {
    data_plane: Arc<DataPlane>,
    host: String,
    port: u16,
}

impl InferenceServer {
    pub fn new(data_plane: Arc<DataPlane>, host: impl Into<String>, port: u16) -> Self {
        Self {
            data_plane,
            host: host.into(),
            port,
        }
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> std::io::Result<()> {
        let app = build_router(self.data_plane);
        let addr = format!("{}:{}", self.host, self.port);
        info!(addr = %addr, "tensorport inference server starting");
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await
    }
}
