//! V2 protocol surface, exercised through the axum router.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tensorport_server::build_router;
use tensorport_testing::{int_request, plane_with_ready_dummy, plane_with_registered_dummy};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn server_metadata_reports_name_and_version() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let response = app.oneshot(get("/v2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "tensorport");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn liveness_is_always_ok() {
    let (plane, _dir) = plane_with_registered_dummy("m").await;
    let app = build_router(plane);

    let response = app.oneshot(get("/v2/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_is_service_unavailable_until_models_load() {
    let (plane, _dir) = plane_with_registered_dummy("m").await;
    let app = build_router(plane);

    let response = app.clone().oneshot(get("/v2/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn readiness_is_ok_once_all_models_are_ready() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let response = app.oneshot(get("/v2/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn model_ready_distinguishes_loaded_unloaded_and_unknown() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let response = app.clone().oneshot(get("/v2/models/m/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/v2/models/missing/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "model 'missing' not found");
}

#[tokio::test]
async fn model_metadata_describes_signatures() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let response = app.oneshot(get("/v2/models/m")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "m");
    assert_eq!(body["platform"], "tensorport.dummy");
    assert_eq!(body["outputs"][0]["name"], "predict");
    assert_eq!(body["outputs"][1]["name"], "predict_proba");
}

#[tokio::test]
async fn infer_returns_the_default_output() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let request = serde_json::to_value(int_request(&[])).unwrap();
    let response = app
        .oneshot(post_json("/v2/models/m/infer", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["model_name"], "m");
    assert_eq!(body["outputs"][0]["name"], "predict");
    assert_eq!(body["outputs"][0]["data"], json!([1, 1, 1]));
}

#[tokio::test]
async fn infer_on_unknown_model_is_not_found() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let request = serde_json::to_value(int_request(&[])).unwrap();
    let response = app
        .oneshot(post_json("/v2/models/missing/infer", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_body_gets_the_standard_error_shape() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v2/models/m/infer")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid input: malformed request body")
    );
}

#[tokio::test]
async fn shape_mismatch_is_a_bad_request() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let request = json!({
        "inputs": [
            {"name": "input-0", "shape": [2, 2], "datatype": "INT64", "data": [1, 2, 3]}
        ]
    });
    let response = app
        .oneshot(post_json("/v2/models/m/infer", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("input 'input-0'"));
}

#[tokio::test]
async fn unknown_requested_output_is_a_bad_request() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    let request = serde_json::to_value(int_request(&["something_else"])).unwrap();
    let response = app
        .oneshot(post_json("/v2/models/m/infer", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("something_else"));
}

#[tokio::test]
async fn versioned_routes_resolve_exact_versions() {
    let (plane, _dir) = plane_with_ready_dummy("m").await;
    let app = build_router(plane);

    // The fixture registers no explicit version, so an exact-version
    // lookup misses while the unversioned route serves.
    let response = app
        .clone()
        .oneshot(get("/v2/models/m/versions/9/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/v2/models/m/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
