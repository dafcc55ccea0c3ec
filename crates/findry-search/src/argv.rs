//! Argument marshaling: `SearchRequest` → flat ordered argument list.
//!
//! The external search process may be positional-sensitive, so emission order
//! is fixed and marshaling the same request twice yields identical output.
//! Marshaling is total over any well-typed request; type validation happens
//! at the boundary before this stage.

use findry_core::{defaults, SearchRequest};

/// Convert a search request into the argument tokens for the search process.
///
/// Rules:
/// - the `--data` pair is always emitted, defaulting to `data.json`
/// - optional string/number fields present emit a `(--flag, value)` pair;
///   numbers use Rust's default decimal form, no locale formatting
/// - boolean flags present **and true** emit a single bare token; false or
///   absent emits nothing
/// - absent optional fields emit nothing at all, never an empty token
///
/// Whether chunking fields are meaningful for the request's chunking mode is
/// the caller's concern; the marshaler emits whatever is present.
pub fn marshal(request: &SearchRequest) -> Vec<String> {
    let mut argv = Vec::new();

    argv.push("--data".to_string());
    argv.push(
        request
            .data
            .clone()
            .unwrap_or_else(|| defaults::DATA_FILE.to_string()),
    );

    push_pair(&mut argv, "--persist", request.persist.as_deref());
    push_pair(&mut argv, "--collection", request.collection.as_deref());
    push_pair(&mut argv, "--space", request.space.as_deref());
    push_pair(&mut argv, "--model", request.model.as_deref());

    argv.push("--query".to_string());
    argv.push(request.query.clone());

    if let Some(k) = request.k {
        push_pair(&mut argv, "--k", Some(&k.to_string()));
    }
    if let Some(threshold) = request.threshold {
        push_pair(&mut argv, "--threshold", Some(&threshold.to_string()));
    }

    push_flag(&mut argv, "--normalize", request.normalize);
    push_flag(&mut argv, "--phrase-prefilter", request.phrase_prefilter);
    push_flag(&mut argv, "--index-chunks", request.index_chunks);

    if let Some(mode) = request.chunking_mode {
        push_pair(&mut argv, "--chunking-mode", Some(mode.as_str()));
    }
    if let Some(n) = request.sentences_per_chunk {
        push_pair(&mut argv, "--sentences-per-chunk", Some(&n.to_string()));
    }
    if let Some(n) = request.sentence_overlap {
        push_pair(&mut argv, "--sentence-overlap", Some(&n.to_string()));
    }
    if let Some(n) = request.tokens_per_chunk {
        push_pair(&mut argv, "--tokens-per-chunk", Some(&n.to_string()));
    }
    if let Some(n) = request.token_overlap {
        push_pair(&mut argv, "--token-overlap", Some(&n.to_string()));
    }
    if let Some(m) = request.chunk_query_multiplier {
        push_pair(&mut argv, "--chunk-query-multiplier", Some(&m.to_string()));
    }

    argv
}

fn push_pair(argv: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        argv.push(flag.to_string());
        argv.push(value.to_string());
    }
}

fn push_flag(argv: &mut Vec<String>, flag: &str, value: Option<bool>) {
    if value == Some(true) {
        argv.push(flag.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findry_core::ChunkingMode;

    #[test]
    fn test_minimal_request_emits_data_and_query_only() {
        let argv = marshal(&SearchRequest::new("hello world"));
        assert_eq!(argv, vec!["--data", "data.json", "--query", "hello world"]);
    }

    #[test]
    fn test_absent_fields_leak_no_tokens() {
        let argv = marshal(&SearchRequest::new("q"));
        assert!(argv.iter().all(|t| !t.is_empty()));
        for flag in [
            "--persist",
            "--collection",
            "--space",
            "--model",
            "--k",
            "--threshold",
            "--normalize",
            "--phrase-prefilter",
            "--index-chunks",
            "--chunking-mode",
            "--sentences-per-chunk",
            "--sentence-overlap",
            "--tokens-per-chunk",
            "--token-overlap",
            "--chunk-query-multiplier",
        ] {
            assert!(!argv.contains(&flag.to_string()), "unexpected {flag}");
        }
    }

    #[test]
    fn test_data_defaults_and_overrides() {
        let mut request = SearchRequest::new("q");
        assert_eq!(marshal(&request)[1], "data.json");

        request.data = Some("search/uploads/1700000000000_users.json".to_string());
        assert_eq!(marshal(&request)[1], "search/uploads/1700000000000_users.json");
    }

    #[test]
    fn test_boolean_flags_are_presence_only() {
        let mut request = SearchRequest::new("q");
        request.normalize = Some(true);
        request.phrase_prefilter = Some(false);
        request.index_chunks = None;

        let argv = marshal(&request);
        assert!(argv.contains(&"--normalize".to_string()));
        assert!(!argv.contains(&"--phrase-prefilter".to_string()));
        assert!(!argv.contains(&"--index-chunks".to_string()));
        // Bare flag: no value token follows.
        let pos = argv.iter().position(|t| t == "--normalize").unwrap();
        assert_eq!(pos, argv.len() - 1);
    }

    #[test]
    fn test_numbers_use_default_decimal_form() {
        let mut request = SearchRequest::new("q");
        request.k = Some(5);
        request.threshold = Some(0.25);
        request.chunk_query_multiplier = Some(4.0);

        let argv = marshal(&request);
        let value_after = |flag: &str| {
            let pos = argv.iter().position(|t| t == flag).unwrap();
            argv[pos + 1].clone()
        };
        assert_eq!(value_after("--k"), "5");
        assert_eq!(value_after("--threshold"), "0.25");
        assert_eq!(value_after("--chunk-query-multiplier"), "4");
    }

    #[test]
    fn test_fixed_emission_order() {
        let mut request = SearchRequest::new("devops");
        request.k = Some(10);
        request.threshold = Some(0.5);
        request.model = Some("m".to_string());
        request.persist = Some("p".to_string());
        request.collection = Some("c".to_string());
        request.space = Some("cosine".to_string());
        request.normalize = Some(true);
        request.phrase_prefilter = Some(true);
        request.index_chunks = Some(true);
        request.chunking_mode = Some(ChunkingMode::Sentence);
        request.sentences_per_chunk = Some(3);
        request.sentence_overlap = Some(1);
        request.chunk_query_multiplier = Some(2.5);

        let argv = marshal(&request);
        assert_eq!(
            argv,
            vec![
                "--data",
                "data.json",
                "--persist",
                "p",
                "--collection",
                "c",
                "--space",
                "cosine",
                "--model",
                "m",
                "--query",
                "devops",
                "--k",
                "10",
                "--threshold",
                "0.5",
                "--normalize",
                "--phrase-prefilter",
                "--index-chunks",
                "--chunking-mode",
                "sentence",
                "--sentences-per-chunk",
                "3",
                "--sentence-overlap",
                "1",
                "--chunk-query-multiplier",
                "2.5",
            ]
        );
    }

    #[test]
    fn test_marshaling_is_idempotent() {
        let mut request = SearchRequest::new("q");
        request.k = Some(7);
        request.index_chunks = Some(true);
        request.chunking_mode = Some(ChunkingMode::Token);
        request.tokens_per_chunk = Some(200);
        request.token_overlap = Some(50);

        assert_eq!(marshal(&request), marshal(&request));
    }
}
