//! The data-plane orchestrator.
//!
//! Stateless per request: all mutable state lives in the
//! [`ModelRegistry`]. Each operation resolves through the registry,
//! runs the translator, delegates to the adapter, and maps every
//! failure into the [`ServeError`] taxonomy before it reaches the
//! transport boundary.

use crate::registry::{ModelRegistry, ModelState};
use std::sync::Arc;
use std::time::Duration;
use tensorport_core::{
    InferenceRequest, InferenceResponse, ModelMetadata, ServeError, ServeResult, ServerMetadata,
    ServerSettings, translate,
};
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

/// Orchestrator exposing the six protocol operations.
pub struct DataPlane {
    settings: ServerSettings,
    registry: Arc<ModelRegistry>,
}

impl DataPlane {
    pub fn new(settings: ServerSettings, registry: Arc<ModelRegistry>) -> Self {
        Self { settings, registry }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Liveness: true once the process accepts traffic. Never fails.
    pub fn live(&self) -> bool {
        true
    }

    /// Server readiness: true iff every registered model is Ready, or
    /// the registry is empty. Never fails.
    pub async fn ready(&self) -> bool {
        self.registry.all_ready().await
    }

    /// Per-model readiness. Errors only when the identity was never
    /// registered.
    pub async fn model_ready(&self, name: &str, version: Option<&str>) -> ServeResult<bool> {
        match self.registry.state_of(name, version).await {
            Some(state) => Ok(state == ModelState::Ready),
            None => {
                let identity = identity_label(name, version);
                Err(ServeError::ModelNotFound(identity))
            }
        }
    }

    /// Static server description. Never fails.
    pub fn server_metadata(&self) -> ServerMetadata {
        ServerMetadata {
            name: self.settings.server_name.clone(),
            version: self.settings.server_version.clone(),
            extensions: self.settings.extensions.clone(),
        }
    }

    pub async fn model_metadata(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> ServeResult<ModelMetadata> {
        self.registry.model_metadata(name, version).await
    }

    /// Validate, resolve, and run inference under a deadline.
    ///
    /// The deadline comes from the request's `timeout_ms` parameter or
    /// the server default. Expiry abandons the call and reports an
    /// inference failure; interruption of the adapter's own computation
    /// is best-effort only.
    pub async fn infer(
        &self,
        name: &str,
        version: Option<&str>,
        request: InferenceRequest,
    ) -> ServeResult<InferenceResponse> {
        let resolved = self.registry.resolve(name, version).await?;
        translate::validate_request(&request)?;
        let deadline_ms = request
            .timeout_ms()
            .unwrap_or(self.settings.default_deadline_ms);

        debug!(
            model = %resolved.name,
            version = resolved.version.as_deref().unwrap_or("-"),
            inputs = request.inputs.len(),
            deadline_ms,
            "dispatching inference"
        );

        let predicted = timeout(
            Duration::from_millis(deadline_ms),
            resolved.adapter.predict(&request),
        )
        .await
        .map_err(|_| {
            ServeError::Inference(format!("prediction exceeded deadline of {deadline_ms} ms"))
        })??;

        // The response reports the identity that was actually served,
        // which matters when version resolution picked a default.
        Ok(InferenceResponse {
            model_name: resolved.name,
            model_version: resolved.version.or(predicted.model_version),
            id: request.id.or_else(|| Some(Uuid::new_v4().to_string())),
            outputs: predicted.outputs,
        })
    }
}

fn identity_label(name: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("{name}:{v}"),
        None => name.to_string(),
    }
}
