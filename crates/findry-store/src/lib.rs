//! # findry-store
//!
//! Dataset upload storage and the ingestion validation gate.
//!
//! Uploaded datasets are plain files in a configurable directory, named with
//! a millisecond-timestamp prefix so no metadata registry is needed. When a
//! caller requests validation of a JSON upload, the buffer is checked against
//! the user-record schema before anything touches disk: an invalid dataset is
//! never partially persisted.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use findry_core::{defaults, Error, Result, UserSchemaValidator, ValidationOutcome};

/// File-backed dataset store.
///
/// Holds no in-memory state beyond the directory path; listing re-reads the
/// directory on demand.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create from the `DATASETS_DIR` environment variable, defaulting to
    /// `../search/uploads` (the standard deployment layout).
    pub fn from_env() -> Self {
        let dir = std::env::var(defaults::ENV_DATASETS_DIR)
            .unwrap_or_else(|_| defaults::DATASETS_DIR.to_string());
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ingest an uploaded dataset, returning the stored path.
    ///
    /// The stored name is the trimmed `claimed_name` when non-empty, else the
    /// original upload filename, else `data.json`, prefixed with the
    /// ingestion timestamp in milliseconds.
    ///
    /// When `validate` is set **and** the claimed MIME type indicates JSON,
    /// the buffer must decode as UTF-8, parse as JSON, and pass user-record
    /// array validation; any failure aborts before the file is written. When
    /// validation is not requested, or the upload is not claimed as JSON, the
    /// buffer is written verbatim — ingestion trusts the caller then.
    pub async fn ingest(
        &self,
        data: &[u8],
        claimed_name: Option<&str>,
        original_name: Option<&str>,
        mime_type: &str,
        validate: bool,
        schema: &UserSchemaValidator,
    ) -> Result<PathBuf> {
        let safe_name = stored_name(claimed_name, original_name);

        if validate && is_json_mime(mime_type) {
            let text = std::str::from_utf8(data)
                .map_err(|e| Error::InvalidInput(format!("Invalid JSON file: {e}")))?;
            let payload: JsonValue = serde_json::from_str(text)
                .map_err(|e| Error::InvalidInput(format!("Invalid JSON file: {e}")))?;
            if let ValidationOutcome::Invalid(violations) = schema.validate_array(&payload) {
                debug!(
                    dataset = %safe_name,
                    violations = violations.len(),
                    "rejected dataset upload"
                );
                return Err(Error::SchemaValidation(violations));
            }
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let stored = format!("{}_{}", Utc::now().timestamp_millis(), safe_name);
        let dest = self.dir.join(&stored);
        tokio::fs::write(&dest, data).await?;

        info!(
            dataset = %stored,
            dataset_bytes = data.len(),
            "stored uploaded dataset"
        );
        Ok(dest)
    }

    /// List stored datasets: directory entries ending in `.json`, sorted.
    ///
    /// A missing or unreadable directory yields an empty list, never an
    /// error.
    pub async fn list(&self) -> Vec<String> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut files = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(defaults::DATASET_SUFFIX) {
                files.push(self.dir.join(name).to_string_lossy().into_owned());
            }
        }
        files.sort();
        files
    }
}

fn stored_name(claimed_name: Option<&str>, original_name: Option<&str>) -> String {
    claimed_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| original_name.filter(|s| !s.is_empty()))
        .unwrap_or(defaults::DATASET_NAME)
        .to_string()
}

fn is_json_mime(mime_type: &str) -> bool {
    let essence = mime_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case("application/json")
}
