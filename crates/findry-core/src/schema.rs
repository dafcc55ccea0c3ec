//! User-record schema validation for dataset ingestion.
//!
//! The schema document is resolved once at startup (explicit override, then a
//! parent-relative default, then a local default), compiled into a reusable
//! validator, and shared immutably for the lifetime of the server. A missing
//! or malformed schema is a fatal startup condition, never a per-request
//! error.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::defaults;
use crate::error::{Error, Result};

/// A single schema violation, located within the failing array element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// Index of the offending element in the uploaded array. Absent for the
    /// payload-level "expected an array" violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// JSON pointer to the failing field within the element.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

/// Outcome of validating one uploaded payload. Constructed per call, never
/// retained.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<SchemaViolation>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Compiled user-record schema, shared process-wide.
pub struct UserSchemaValidator {
    compiled: JSONSchema,
    source: PathBuf,
}

impl fmt::Debug for UserSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSchemaValidator")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl UserSchemaValidator {
    /// Compile a schema document into a reusable validator.
    pub fn from_document(document: &JsonValue) -> Result<Self> {
        let compiled = JSONSchema::compile(document)
            .map_err(|e| Error::Schema(format!("schema compilation failed: {e}")))?;
        Ok(Self {
            compiled,
            source: PathBuf::from("(inline)"),
        })
    }

    /// Load and compile the user schema from the first existing candidate
    /// path: the explicit override, `../schemas/user.schema.json`, then
    /// `schemas/user.schema.json`.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = resolve_schema_path(override_path)?;
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Error::Schema(format!("failed to read {}: {e}", path.display())))?;
        let document: JsonValue = serde_json::from_str(&raw)
            .map_err(|e| Error::Schema(format!("{} is not valid JSON: {e}", path.display())))?;
        let mut validator = Self::from_document(&document)?;
        validator.source = path;
        info!(schema = %validator.source.display(), "Compiled user record schema");
        Ok(validator)
    }

    /// Load the schema using the `USER_SCHEMA_PATH` override when set.
    pub fn from_env() -> Result<Self> {
        let override_path = std::env::var(defaults::ENV_USER_SCHEMA_PATH)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Self::load(override_path.as_deref())
    }

    /// Path the schema was loaded from, for startup diagnostics.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Validate a payload as an array of user records.
    ///
    /// Elements are checked in array order and validation stops at the
    /// **first** invalid element: that element's violations are returned
    /// tagged with its index, and later elements are not inspected. A
    /// non-array payload fails fast with a single payload-level violation.
    ///
    /// Pure over the payload and the compiled schema; no side effects.
    pub fn validate_array(&self, payload: &JsonValue) -> ValidationOutcome {
        let items = match payload.as_array() {
            Some(items) => items,
            None => {
                return ValidationOutcome::Invalid(vec![SchemaViolation {
                    index: None,
                    path: String::new(),
                    message: "Expected array of users".to_string(),
                }])
            }
        };

        for (index, item) in items.iter().enumerate() {
            if let Err(errors) = self.compiled.validate(item) {
                let violations = errors
                    .map(|e| SchemaViolation {
                        index: Some(index),
                        path: e.instance_path.to_string(),
                        message: e.to_string(),
                    })
                    .collect();
                return ValidationOutcome::Invalid(violations);
            }
        }

        ValidationOutcome::Valid
    }
}

fn resolve_schema_path(override_path: Option<&Path>) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(p) = override_path {
        candidates.push(p.to_path_buf());
    }
    candidates.push(PathBuf::from("..").join("schemas").join(defaults::SCHEMA_FILE));
    candidates.push(PathBuf::from("schemas").join(defaults::SCHEMA_FILE));

    candidates
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| {
            Error::Schema(format!(
                "user schema not found; set {} or place {} under ./schemas or ../schemas",
                defaults::ENV_USER_SCHEMA_PATH,
                defaults::SCHEMA_FILE
            ))
        })
}
