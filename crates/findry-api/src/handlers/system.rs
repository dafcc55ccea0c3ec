//! Health check and system handlers.

use axum::Json;
use serde_json::{json, Value as JsonValue};
use utoipa::OpenApi;

use crate::ApiDoc;

/// Service health check.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "service": "findry-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Serve the generated OpenAPI document.
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
