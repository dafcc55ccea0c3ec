//! Structured logging schema and field name constants for findry.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, request-scoped failure |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request's sub-calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "search", "store"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "search", "ingest", "list_datasets"
pub const OPERATION: &str = "op";

// ─── Search fields ─────────────────────────────────────────────────────────

/// Search query text.
pub const QUERY: &str = "query";

/// Embedding model requested for the search.
pub const MODEL: &str = "model";

/// Number of argv tokens marshaled for the search process.
pub const ARGV_LEN: &str = "argv_len";

/// Exit code reported by the search process.
pub const EXIT_CODE: &str = "exit_code";

// ─── Dataset fields ────────────────────────────────────────────────────────

/// Stored dataset filename.
pub const DATASET: &str = "dataset";

/// Uploaded dataset size in bytes.
pub const DATASET_BYTES: &str = "dataset_bytes";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
