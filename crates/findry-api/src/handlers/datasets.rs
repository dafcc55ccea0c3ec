//! Dataset upload and listing HTTP handlers.

use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::{ApiError, AppState};

/// Response from a dataset upload.
#[derive(Debug, Serialize)]
pub struct UploadDatasetResponse {
    /// Stored path of the uploaded dataset, expressed relative to the search
    /// process's working directory so it can be passed straight back as a
    /// search `data` value.
    pub path: String,
}

/// Response from listing stored datasets.
#[derive(Debug, Serialize)]
pub struct ListDatasetsResponse {
    pub files: Vec<String>,
}

/// Upload a dataset.
///
/// Accepts multipart/form-data with the dataset file and optional controls.
///
/// # Multipart Fields
/// - `file`: Dataset file (required)
/// - `name`: Stored name override (optional; the upload's filename is used
///   when absent)
/// - `validate`: "true"/"1"/"yes"/"on" to validate a JSON upload against the
///   user-record schema before it is stored (optional)
///
/// # Returns
/// - 200 OK with the stored path
/// - 400 Bad Request if the file is missing, or validation was requested and
///   the dataset is not valid JSON or fails the schema (with per-element
///   details; nothing is written in that case)
#[utoipa::path(post, path = "/datasets", tag = "Datasets",
    responses((status = 200, description = "Stored dataset path")))]
pub async fn upload_dataset(
    State(state): State<AppState>,
    mut multipart: axum::extract::Multipart,
) -> Result<Json<UploadDatasetResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut original_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut name: Option<String> = None;
    let mut validate = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                original_name = field.file_name().map(|n| n.to_string());
                content_type = field.content_type().map(|c| c.to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Read error: {e}")))?
                        .to_vec(),
                );
            }
            Some("name") => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {e}")))?;
                if !val.trim().is_empty() {
                    name = Some(val);
                }
            }
            Some("validate") => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {e}")))?;
                validate = parse_bool_field(&val);
            }
            _ => {} // ignore unknown fields
        }
    }

    let data = file_data.ok_or_else(|| {
        ApiError::BadRequest(
            "No file provided. Use multipart/form-data with field \"file\".".to_string(),
        )
    })?;

    let mime_type = content_type.as_deref().unwrap_or("application/octet-stream");
    let dest = state
        .store
        .ingest(
            &data,
            name.as_deref(),
            original_name.as_deref(),
            mime_type,
            validate,
            &state.schema,
        )
        .await?;

    Ok(Json(UploadDatasetResponse {
        path: data_path(&state.engine.config().workdir, &dest),
    }))
}

/// List stored datasets.
///
/// Re-reads the datasets directory on every call; a missing directory yields
/// an empty list.
#[utoipa::path(get, path = "/datasets", tag = "Datasets",
    responses((status = 200, description = "Stored dataset paths")))]
pub async fn list_datasets(State(state): State<AppState>) -> Json<ListDatasetsResponse> {
    let workdir = &state.engine.config().workdir;
    let files = state
        .store
        .list()
        .await
        .iter()
        .map(|file| data_path(workdir, Path::new(file)))
        .collect();
    Json(ListDatasetsResponse { files })
}

fn parse_bool_field(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Express a stored dataset path relative to the search process's working
/// directory, the form the search `data` flag resolves.
///
/// The API and the search process run from different directories, so the
/// filesystem path the store writes to is not directly usable as a `data`
/// value. A datasets directory that does not sit under the search workdir
/// falls back to the absolute form, which resolves from anywhere.
fn data_path(search_workdir: &Path, stored: &Path) -> String {
    let stored = absolutize(stored);
    match stored.strip_prefix(absolutize(search_workdir)) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => stored.to_string_lossy().into_owned(),
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
