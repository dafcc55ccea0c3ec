//! # findry-search
//!
//! Query orchestration for findry.
//!
//! This crate turns a validated [`SearchRequest`](findry_core::SearchRequest)
//! into one invocation of the external search process and resolves it to the
//! process's parsed JSON payload or a classified failure:
//! - [`argv`] marshals request fields into a flat, ordered argument list
//! - [`process`] owns the spawn-to-exit lifecycle and failure classification
//! - [`engine`] is the facade that validates, marshals, and invokes
//!
//! The external process performs all embedding, indexing, chunking, and
//! nearest-neighbor work; nothing in this crate ranks or retrieves.
//!
//! ## Example
//!
//! ```ignore
//! use findry_core::SearchRequest;
//! use findry_search::SearchEngine;
//!
//! let engine = SearchEngine::from_env();
//! let payload = engine.search(SearchRequest::new("rust developers")).await?;
//! ```

pub mod argv;
pub mod config;
pub mod engine;
pub mod process;

pub use argv::marshal;
pub use config::EngineConfig;
pub use engine::SearchEngine;
pub use process::invoke;
