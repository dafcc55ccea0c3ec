//! # findry-core
//!
//! Core types, errors, and dataset schema validation for findry.
//!
//! This crate provides the foundational data structures the other findry
//! crates depend on: the canonical [`SearchRequest`] query parameters, the
//! shared [`Error`] taxonomy, default constants, structured-logging field
//! names, and the compiled user-record schema validator used by the dataset
//! ingestion gate.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod schema;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{ChunkingMode, SearchRequest};
pub use schema::{SchemaViolation, UserSchemaValidator, ValidationOutcome};
