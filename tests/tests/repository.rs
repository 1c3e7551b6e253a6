//! Model repository bootstrap behavior.

use std::path::Path;
use std::sync::Arc;
use tensorport_adapters::DummyClassifierFactory;
use tensorport_runtime::{AdapterCatalog, ModelRegistry, ModelState, load_repository};

fn write_model(root: &Path, dir: &str, settings: &str, artifact: Option<&str>) {
    let model_dir = root.join(dir);
    std::fs::create_dir_all(&model_dir).unwrap();
    std::fs::write(model_dir.join("model-settings.json"), settings).unwrap();
    if let Some(artifact) = artifact {
        std::fs::write(model_dir.join("model.json"), artifact).unwrap();
    }
}

#[tokio::test]
async fn repository_loads_every_valid_model() {
    let root = tempfile::tempdir().unwrap();
    write_model(
        root.path(),
        "mnist",
        r#"{"name": "mnist", "implementation": "tensorport.dummy"}"#,
        Some(r#"{"classes": [0, 1], "priors": [0.5, 0.5]}"#),
    );
    write_model(
        root.path(),
        "iris",
        r#"{"name": "iris", "version": "1", "implementation": "tensorport.dummy"}"#,
        Some(r#"{"classes": [0, 1, 2], "priors": [0.2, 0.3, 0.5]}"#),
    );

    let catalog = AdapterCatalog::new().with_factory(Arc::new(DummyClassifierFactory));
    let registry = ModelRegistry::new();
    let ready = load_repository(root.path(), &catalog, &registry)
        .await
        .unwrap();

    assert_eq!(ready, 2);
    assert_eq!(registry.model_count(), 2);
    assert_eq!(
        registry.state_of("mnist", None).await,
        Some(ModelState::Ready)
    );
    assert_eq!(
        registry.state_of("iris", Some("1")).await,
        Some(ModelState::Ready)
    );
}

#[tokio::test]
async fn broken_models_do_not_abort_the_bootstrap() {
    let root = tempfile::tempdir().unwrap();
    write_model(
        root.path(),
        "good",
        r#"{"name": "good", "implementation": "tensorport.dummy"}"#,
        Some(r#"{"classes": [0, 1], "priors": [0.5, 0.5]}"#),
    );
    // Missing artifact: registration succeeds, load fails.
    write_model(
        root.path(),
        "no-artifact",
        r#"{"name": "no-artifact", "implementation": "tensorport.dummy"}"#,
        None,
    );
    // Unknown implementation: skipped before registration.
    write_model(
        root.path(),
        "unknown",
        r#"{"name": "unknown", "implementation": "vendor.mystery"}"#,
        None,
    );

    let catalog = AdapterCatalog::new().with_factory(Arc::new(DummyClassifierFactory));
    let registry = ModelRegistry::new();
    let ready = load_repository(root.path(), &catalog, &registry)
        .await
        .unwrap();

    assert_eq!(ready, 1);
    assert_eq!(
        registry.state_of("good", None).await,
        Some(ModelState::Ready)
    );
    assert!(matches!(
        registry.state_of("no-artifact", None).await,
        Some(ModelState::LoadFailed(_))
    ));
    assert_eq!(registry.state_of("unknown", None).await, None);
}

#[tokio::test]
async fn missing_repository_root_is_an_error() {
    let catalog = AdapterCatalog::new();
    let registry = ModelRegistry::new();
    assert!(
        load_repository(Path::new("/nonexistent/repo"), &catalog, &registry)
            .await
            .is_err()
    );
}
