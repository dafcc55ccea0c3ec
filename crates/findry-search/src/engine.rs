//! Query orchestration facade.

use std::time::Instant;

use serde_json::Value as JsonValue;
use tracing::info;

use findry_core::{ChunkingMode, Error, Result, SearchRequest};

use crate::argv;
use crate::config::EngineConfig;
use crate::process;

/// The single entry point for search requests.
///
/// Validates the request, selects the relevant chunking-field subset,
/// marshals the arguments, and drives one search process invocation. No
/// caching: identical requests re-invoke the process in full every time.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one search, resolving to the process's parsed JSON payload.
    ///
    /// Fails with [`Error::InvalidInput`] before any marshaling or spawning
    /// when the query is empty; process-level failures carry the
    /// classification from [`process::invoke`].
    pub async fn search(&self, request: SearchRequest) -> Result<JsonValue> {
        if request.query.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Body must include query: string".to_string(),
            ));
        }

        let request = select_chunking_fields(request);
        let args = self.build_args(&request);

        info!(
            query = %request.query,
            argv_len = args.len(),
            "dispatching search process"
        );

        let started = Instant::now();
        let payload = process::invoke(&self.config.bin, &args, &self.config.workdir).await?;

        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            result_count = payload.get("count").and_then(JsonValue::as_u64),
            "search completed"
        );
        Ok(payload)
    }

    /// Full argument vector: module entry point followed by marshaled flags.
    fn build_args(&self, request: &SearchRequest) -> Vec<String> {
        let mut args = vec!["-m".to_string(), self.config.module.clone()];
        args.extend(argv::marshal(request));
        args
    }
}

/// Keep only the chunking fields relevant to the request's chunking mode.
///
/// Sentence-mode and token-mode parameters are mutually exclusive; the
/// inactive subset is cleared here so it never reaches the marshaler. With
/// no mode set, fields pass through untouched (the search process owns that
/// default).
fn select_chunking_fields(mut request: SearchRequest) -> SearchRequest {
    match request.chunking_mode {
        Some(ChunkingMode::Sentence) => {
            request.tokens_per_chunk = None;
            request.token_overlap = None;
        }
        Some(ChunkingMode::Token) => {
            request.sentences_per_chunk = None;
            request.sentence_overlap = None;
        }
        None => {}
    }
    request
}
