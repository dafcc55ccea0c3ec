//! Canonical request models for the search boundary.

use serde::{Deserialize, Serialize};

/// Strategy for splitting source text into indexable segments.
///
/// Only interpreted by the external search process; findry merely forwards
/// it (and decides which chunking parameters are relevant for each mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingMode {
    Sentence,
    Token,
}

impl ChunkingMode {
    /// Wire form passed to the search process via `--chunking-mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkingMode::Sentence => "sentence",
            ChunkingMode::Token => "token",
        }
    }
}

/// The canonical search query parameters.
///
/// Deserialized from the `POST /search` JSON body. Every optional field that
/// is absent stays absent all the way to the marshaled argument list: the
/// external search process owns the defaults and distinguishes "unset" from
/// "explicitly zero/false".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text. Must be non-empty; enforced by the search engine before
    /// any process is spawned.
    pub query: String,
    /// Number of results to return.
    pub k: Option<u32>,
    /// Normalize embeddings before distance computation.
    pub normalize: Option<bool>,
    /// Prefilter candidates by phrase match.
    pub phrase_prefilter: Option<bool>,
    /// Maximum distance cutoff.
    pub threshold: Option<f64>,
    /// Embedding model name.
    pub model: Option<String>,
    /// Data source path indexed by the search process.
    pub data: Option<String>,
    /// Vector store persistence directory.
    pub persist: Option<String>,
    /// Vector store collection name.
    pub collection: Option<String>,
    /// Distance space (e.g. "cosine", "l2").
    pub space: Option<String>,
    /// Index chunk-level vectors instead of whole records.
    pub index_chunks: Option<bool>,
    /// Chunk splitting strategy; selects which chunking parameters apply.
    pub chunking_mode: Option<ChunkingMode>,
    /// Sentences per chunk (sentence mode).
    pub sentences_per_chunk: Option<u32>,
    /// Overlapping sentences between adjacent chunks (sentence mode).
    pub sentence_overlap: Option<u32>,
    /// Tokens per chunk (token mode).
    pub tokens_per_chunk: Option<u32>,
    /// Overlapping tokens between adjacent chunks (token mode).
    pub token_overlap: Option<u32>,
    /// Over-fetch multiplier when searching chunk-level indexes.
    pub chunk_query_multiplier: Option<f64>,
}

impl SearchRequest {
    /// A request with only the query set; everything else is left to the
    /// search process defaults.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            k: None,
            normalize: None,
            phrase_prefilter: None,
            threshold: None,
            model: None,
            data: None,
            persist: None,
            collection: None,
            space: None,
            index_chunks: None,
            chunking_mode: None,
            sentences_per_chunk: None,
            sentence_overlap: None,
            tokens_per_chunk: None,
            token_overlap: None,
            chunk_query_multiplier: None,
        }
    }
}
