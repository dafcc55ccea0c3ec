//! Error types for findry.

use thiserror::Error;

use crate::schema::SchemaViolation;

/// Result type alias using findry's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for findry operations.
///
/// Request-scoped variants (`InvalidInput`, `Spawn`, `Process`,
/// `MalformedOutput`, `SchemaValidation`) are recovered at the API boundary
/// and converted into an `{error, details?}` response. `Schema` at startup is
/// the one fatal condition: the service never becomes ready without a
/// compiled user schema.
#[derive(Error, Debug)]
pub enum Error {
    /// User input fails a structural/type contract before any process is
    /// spawned.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external search process could not be started.
    #[error("Failed to spawn search process: {0}")]
    Spawn(String),

    /// The external search process ran and exited non-zero.
    #[error("Search process failed: {diagnostic}")]
    Process {
        /// Exit code, absent when the process was killed by a signal.
        exit_code: Option<i32>,
        /// Captured stderr, falling back to stdout when stderr was empty.
        diagnostic: String,
    },

    /// The external search process exited 0 but produced unparsable output.
    /// Distinct from `Process`: this is a contract violation by the search
    /// process, not an application-level failure.
    #[error("Search process produced unparsable output")]
    MalformedOutput { stdout: String, stderr: String },

    /// An uploaded dataset failed user-record schema validation.
    #[error("Invalid dataset format")]
    SchemaValidation(Vec<SchemaViolation>),

    /// User schema could not be located, read, or compiled.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
