//! End-to-end data-plane behavior over the dummy classifier.

use std::sync::Arc;
use tensorport_adapters::DummyClassifierFactory;
use tensorport_core::{ModelIdentity, ModelSettings, ServeError, ServerSettings, TensorData};
use tensorport_runtime::{DataPlane, ModelRegistry};
use tensorport_testing::{
    dummy_model_dir, int_request, plane_with_ready_dummy, plane_with_registered_dummy,
};

#[tokio::test]
async fn registered_but_unloaded_model_serves_nothing() {
    let (plane, _dir) = plane_with_registered_dummy("m").await;

    assert!(!plane.model_ready("m", None).await.unwrap());
    let err = plane.infer("m", None, int_request(&[])).await.unwrap_err();
    assert!(matches!(err, ServeError::ModelNotFound(_)));
}

#[tokio::test]
async fn default_selection_yields_one_prediction_per_row() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;

    let response = plane.infer("m", None, int_request(&[])).await.unwrap();
    assert_eq!(response.model_name, "m");
    assert_eq!(response.outputs.len(), 1);
    assert_eq!(response.outputs[0].name, "predict");
    // Output data length matches the input cardinality.
    assert_eq!(response.outputs[0].data.len(), 3);
}

#[tokio::test]
async fn two_inputs_to_a_single_input_model_fail() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;

    let mut request = int_request(&[]);
    request.inputs.push(request.inputs[0].clone());
    let err = plane.infer("m", None, request).await.unwrap_err();
    assert!(matches!(err, ServeError::Inference(_)));
}

#[tokio::test]
async fn explicit_selection_is_returned_in_request_order() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;

    let response = plane
        .infer("m", None, int_request(&["predict", "predict_proba"]))
        .await
        .unwrap();
    let names: Vec<_> = response.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["predict", "predict_proba"]);

    let reversed = plane
        .infer("m", None, int_request(&["predict_proba", "predict"]))
        .await
        .unwrap();
    let names: Vec<_> = reversed.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["predict_proba", "predict"]);
}

#[tokio::test]
async fn implicit_and_explicit_default_selections_match() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;

    let implicit = plane.infer("m", None, int_request(&[])).await.unwrap();
    let explicit = plane
        .infer("m", None, int_request(&["predict"]))
        .await
        .unwrap();
    assert_eq!(implicit.outputs, explicit.outputs);
    assert_eq!(implicit.outputs[0].data, TensorData::Int(vec![1, 1, 1]));
}

#[tokio::test]
async fn unknown_output_never_yields_a_partial_response() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;

    let err = plane
        .infer("m", None, int_request(&["predict", "something_else"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServeError::Inference(_)));
}

#[tokio::test]
async fn server_readiness_follows_every_registered_model() {
    let dir = dummy_model_dir();
    let registry = Arc::new(ModelRegistry::new());
    let plane = DataPlane::new(ServerSettings::default(), registry.clone());

    assert!(plane.ready().await, "empty registry is ready");

    let good = ModelSettings::new("good", "tensorport.dummy")
        .with_uri(dir.path().to_string_lossy());
    registry
        .register(good, Arc::new(DummyClassifierFactory))
        .await
        .unwrap();
    assert!(!plane.ready().await, "unloaded model blocks readiness");

    let bad = ModelSettings::new("bad", "tensorport.dummy").with_uri("/nonexistent");
    registry
        .register(bad, Arc::new(DummyClassifierFactory))
        .await
        .unwrap();
    assert!(
        registry
            .load(&ModelIdentity::new("bad", None::<String>))
            .await
            .is_err()
    );
    assert!(!plane.ready().await, "failed model blocks readiness");

    registry
        .load(&ModelIdentity::new("good", None::<String>))
        .await
        .unwrap();
    assert!(!plane.ready().await, "one failed model still blocks");

    registry
        .unload(&ModelIdentity::new("bad", None::<String>))
        .await
        .unwrap();
    assert!(plane.ready().await, "all remaining models are ready");
}

#[tokio::test]
async fn metadata_is_queryable_for_failed_models() {
    let registry = Arc::new(ModelRegistry::new());
    let plane = DataPlane::new(ServerSettings::default(), registry.clone());

    let bad = ModelSettings::new("bad", "tensorport.dummy").with_uri("/nonexistent");
    registry
        .register(bad, Arc::new(DummyClassifierFactory))
        .await
        .unwrap();
    let _ = registry.load(&ModelIdentity::new("bad", None::<String>)).await;

    let metadata = plane.model_metadata("bad", None).await.unwrap();
    assert_eq!(metadata.name, "bad");
    assert_eq!(metadata.platform, "tensorport.dummy");
}
