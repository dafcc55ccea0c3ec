//! Router-level tests for the search endpoint, backed by a fake search
//! process script.

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use findry_api::{build_router, AppState};
use findry_core::UserSchemaValidator;
use findry_search::{EngineConfig, SearchEngine};
use findry_store::DatasetStore;

fn fake_search(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-search.sh");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "#!/bin/sh\n{body}").unwrap();
    let mut perms = file.metadata().unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn user_schema() -> UserSchemaValidator {
    UserSchemaValidator::from_document(&json!({
        "type": "object",
        "properties": {
            "first_name": {"type": "string"},
            "last_name": {"type": "string"}
        },
        "required": ["first_name", "last_name"]
    }))
    .unwrap()
}

fn app_with_script(dir: &Path, script_body: &str) -> axum::Router {
    let bin = fake_search(dir, script_body);
    let engine = SearchEngine::new(EngineConfig::new(
        bin.to_string_lossy().into_owned(),
        "search.query",
        dir,
    ));
    let state = AppState {
        engine: Arc::new(engine),
        store: Arc::new(DatasetStore::new(dir.join("uploads"))),
        schema: Arc::new(user_schema()),
    };
    build_router(state, false)
}

fn search_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_search_forwards_process_payload() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_script(
        dir.path(),
        r#"echo '{"query":"devops","k":5,"count":1,"rows":[{"id":"u-1","distance":0.1,"metadata":{}}],"distances":[0.1]}'"#,
    );

    let response = app
        .oneshot(search_request(json!({"query": "devops", "k": 5})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["rows"][0]["id"], "u-1");
}

#[tokio::test]
async fn test_empty_query_is_rejected_without_spawning() {
    let dir = tempfile::tempdir().unwrap();
    // A script that would fail loudly if it ever ran.
    let app = app_with_script(dir.path(), "echo should-not-run >&2; exit 9");

    let response = app
        .oneshot(search_request(json!({"query": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = body_json(response).await;
    assert!(payload["error"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn test_missing_query_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_script(dir.path(), "exit 0");

    let response = app
        .oneshot(search_request(json!({"k": 5})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_process_failure_surfaces_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_script(dir.path(), "echo boom >&2; exit 2");

    let response = app
        .oneshot(search_request(json!({"query": "devops"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = body_json(response).await;
    assert_eq!(payload["error"], "Search process failed (exit code 2)");
    assert_eq!(payload["details"], "boom");
}

#[tokio::test]
async fn test_malformed_process_output_is_a_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_script(dir.path(), "echo not-json");

    let response = app
        .oneshot(search_request(json!({"query": "devops"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = body_json(response).await;
    assert_eq!(payload["error"], "Search process produced unparsable output");
    assert!(payload["details"]["stdout"]
        .as_str()
        .unwrap()
        .contains("not-json"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_script(dir.path(), "exit 0");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["status"], "ok");
}
