//! Shared fixtures for Tensorport integration tests.

use std::sync::Arc;
use tempfile::TempDir;
use tensorport_adapters::DummyClassifierFactory;
use tensorport_core::{
    Datatype, InferenceRequest, ModelIdentity, ModelSettings, RequestInput, RequestOutput,
    ServerSettings, TensorData,
};
use tensorport_runtime::{DataPlane, ModelRegistry};

/// Write a dummy-classifier artifact (classes 0/1, majority class 1)
/// into a fresh temporary directory.
pub fn dummy_model_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join("model.json"),
        br#"{"classes": [0, 1], "priors": [0.3, 0.7]}"#,
    )
    .expect("write artifact");
    dir
}

/// Data plane with one registered (but not loaded) dummy model.
///
/// The returned [`TempDir`] owns the artifact; keep it alive for the
/// duration of the test.
pub async fn plane_with_registered_dummy(name: &str) -> (Arc<DataPlane>, TempDir) {
    let dir = dummy_model_dir();
    let registry = Arc::new(ModelRegistry::new());
    let settings = ModelSettings::new(name, "tensorport.dummy")
        .with_uri(dir.path().to_string_lossy());
    registry
        .register(settings, Arc::new(DummyClassifierFactory))
        .await
        .expect("register model");
    let plane = Arc::new(DataPlane::new(ServerSettings::default(), registry));
    (plane, dir)
}

/// Data plane with one Ready dummy model.
pub async fn plane_with_ready_dummy(name: &str) -> (Arc<DataPlane>, TempDir) {
    let (plane, dir) = plane_with_registered_dummy(name).await;
    plane
        .registry()
        .load(&ModelIdentity::new(name, None::<String>))
        .await
        .expect("load model");
    (plane, dir)
}

/// Request with one `[1, 2, 3]` input of shape `[3]` and the given
/// output selection (empty slice = adapter default).
pub fn int_request(outputs: &[&str]) -> InferenceRequest {
    InferenceRequest {
        id: None,
        parameters: None,
        inputs: vec![RequestInput {
            name: "input-0".to_string(),
            shape: vec![3],
            datatype: Datatype::Int64,
            parameters: None,
            data: TensorData::Int(vec![1, 2, 3]),
        }],
        outputs: if outputs.is_empty() {
            None
        } else {
            Some(outputs.iter().map(|n| RequestOutput::new(*n)).collect())
        },
    }
}
