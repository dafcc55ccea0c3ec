//! Search HTTP handler.

use axum::extract::State;
use axum::Json;
use serde_json::Value as JsonValue;

use crate::{ApiError, AppState};
use findry_core::SearchRequest;

/// Run a semantic search.
///
/// The JSON body is a [`SearchRequest`]; the response is the search
/// process's JSON payload forwarded verbatim. Each call spawns exactly one
/// search process; nothing is cached.
///
/// # Returns
/// - 200 OK with the search payload
/// - 400 Bad Request if the query is missing or empty
/// - 502 Bad Gateway if the search process failed or broke its output contract
/// - 503 Service Unavailable if the search process could not be spawned
#[utoipa::path(post, path = "/search", tag = "Search",
    responses((status = 200, description = "Search payload from the search process")))]
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<JsonValue>, ApiError> {
    let payload = state.engine.search(request).await?;
    Ok(Json(payload))
}
