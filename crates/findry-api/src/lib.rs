//! # findry-api
//!
//! HTTP API server for findry: a thin boundary that forwards validated
//! search requests to the external search process and gates dataset uploads
//! through the user-record schema.

pub mod handlers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value as JsonValue};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use findry_core::{defaults, Error, SchemaViolation, UserSchemaValidator};
use findry_search::SearchEngine;
use findry_store::DatasetStore;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when tracing a request through to its spawned search
/// process.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Query orchestration facade; one search process spawn per call.
    pub engine: Arc<SearchEngine>,
    /// Dataset upload store.
    pub store: Arc<DatasetStore>,
    /// User-record schema, compiled once at startup.
    pub schema: Arc<UserSchemaValidator>,
}

// =============================================================================
// OPENAPI
// =============================================================================

/// OpenAPI documentation, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Findry API",
        description = "Semantic search over user datasets, delegated to an external search process"
    ),
    paths(
        handlers::search::search,
        handlers::datasets::upload_dataset,
        handlers::datasets::list_datasets,
        handlers::system::health,
    ),
    tags(
        (name = "Search", description = "Semantic search queries"),
        (name = "Datasets", description = "Dataset upload and listing"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// API-level error, converted into a uniform `{error, details?}` JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Request fails a structural/type contract; nothing was spawned or
    /// written.
    BadRequest(String),
    /// Uploaded dataset failed user-record schema validation.
    InvalidDataset(Vec<SchemaViolation>),
    /// The search process ran but failed, or violated its output contract.
    Upstream {
        message: String,
        details: Option<JsonValue>,
    },
    /// The search process could not be started at all.
    ServiceUnavailable(String),
    /// Anything else.
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::SchemaValidation(violations) => ApiError::InvalidDataset(violations),
            Error::Spawn(msg) => {
                ApiError::ServiceUnavailable(format!("Search backend unavailable: {msg}"))
            }
            Error::Process {
                exit_code,
                diagnostic,
            } => ApiError::Upstream {
                message: match exit_code {
                    Some(code) => format!("Search process failed (exit code {code})"),
                    None => "Search process failed".to_string(),
                },
                details: Some(JsonValue::String(diagnostic)),
            },
            Error::MalformedOutput { stdout, stderr } => ApiError::Upstream {
                message: "Search process produced unparsable output".to_string(),
                details: Some(json!({ "stdout": stdout, "stderr": stderr })),
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::InvalidDataset(violations) => (
                StatusCode::BAD_REQUEST,
                "Invalid dataset format".to_string(),
                Some(serde_json::to_value(violations).unwrap_or(JsonValue::Null)),
            ),
            ApiError::Upstream { message, details } => {
                (StatusCode::BAD_GATEWAY, message, details)
            }
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let mut body = json!({ "error": message });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with the standard middleware stack.
pub fn build_router(state: AppState, cors_enabled: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::system::health))
        .route("/openapi.json", get(handlers::system::openapi_spec))
        .route("/search", post(handlers::search::search))
        .route(
            "/datasets",
            get(handlers::datasets::list_datasets).post(handlers::datasets::upload_dataset),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(defaults::BODY_LIMIT_BYTES))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(PropagateRequestIdLayer::x_request_id());

    if cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api_err: ApiError = Error::InvalidInput("bad".to_string()).into();
        match api_err {
            ApiError::BadRequest(msg) => assert_eq!(msg, "bad"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_maps_to_service_unavailable() {
        let api_err: ApiError = Error::Spawn("python3 missing".to_string()).into();
        match api_err {
            ApiError::ServiceUnavailable(msg) => assert!(msg.contains("python3 missing")),
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_process_failure_carries_diagnostic_details() {
        let api_err: ApiError = Error::Process {
            exit_code: Some(2),
            diagnostic: "boom".to_string(),
        }
        .into();
        match api_err {
            ApiError::Upstream { message, details } => {
                assert_eq!(message, "Search process failed (exit code 2)");
                assert_eq!(details, Some(JsonValue::String("boom".to_string())));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_output_carries_both_streams() {
        let api_err: ApiError = Error::MalformedOutput {
            stdout: "not-json".to_string(),
            stderr: "warning".to_string(),
        }
        .into();
        match api_err {
            ApiError::Upstream { details, .. } => {
                let details = details.unwrap();
                assert_eq!(details["stdout"], "not-json");
                assert_eq!(details["stderr"], "warning");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
