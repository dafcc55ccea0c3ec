//! Centralized default constants for the findry system.
//!
//! **This module is the single source of truth** for all shared default
//! values and environment variable names. All crates reference these
//! constants instead of defining their own magic strings.

// =============================================================================
// SEARCH PROCESS
// =============================================================================

/// Default interpreter binary for the external search process.
pub const SEARCH_BIN: &str = "python3";

/// Default module identifier passed to the interpreter via `-m`.
pub const SEARCH_MODULE: &str = "search.query";

/// Default data source passed to the search process when a request does not
/// name one.
pub const DATA_FILE: &str = "data.json";

// =============================================================================
// DATASETS
// =============================================================================

/// Default datasets directory, relative to the API working directory.
pub const DATASETS_DIR: &str = "../search/uploads";

/// Fallback stored name when an upload carries neither a `name` field nor an
/// original filename.
pub const DATASET_NAME: &str = "data.json";

/// Suffix a directory entry must carry to be listed as a dataset.
pub const DATASET_SUFFIX: &str = ".json";

// =============================================================================
// USER SCHEMA
// =============================================================================

/// User-record schema filename looked up under the candidate directories.
pub const SCHEMA_FILE: &str = "user.schema.json";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3001;

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Maximum accepted request body size in bytes (dataset uploads).
pub const BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

/// Interpreter binary for the external search process.
pub const ENV_SEARCH_BIN: &str = "SEARCH_BIN";

/// Module identifier for the external search process.
pub const ENV_SEARCH_MODULE: &str = "SEARCH_MODULE";

/// Working directory the search process is spawned in.
pub const ENV_SEARCH_WORKDIR: &str = "SEARCH_WORKDIR";

/// Directory uploaded datasets are stored in.
pub const ENV_DATASETS_DIR: &str = "DATASETS_DIR";

/// Explicit override path for the user-record schema document.
pub const ENV_USER_SCHEMA_PATH: &str = "USER_SCHEMA_PATH";

/// HTTP server port.
pub const ENV_APP_PORT: &str = "APP_PORT";

/// HTTP bind host.
pub const ENV_HOST: &str = "HOST";

/// Whether permissive CORS is enabled ("true"/"1" to enable).
pub const ENV_CORS_ENABLED: &str = "IS_CORS_ENABLED";
