//! findry-api - HTTP API server for findry

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use findry_api::{build_router, AppState};
use findry_core::{defaults, UserSchemaValidator};
use findry_search::SearchEngine;
use findry_store::DatasetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "findry_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "findry_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("findry-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Compile the user-record schema. This is bootstrap-time state: without
    // it the dataset ingestion gate cannot run, so a missing or malformed
    // schema aborts startup.
    let schema = UserSchemaValidator::from_env()
        .context("user schema is required at startup (see USER_SCHEMA_PATH)")?;
    info!(schema = %schema.source().display(), "User schema ready");

    let engine = SearchEngine::from_env();
    info!(
        bin = %engine.config().bin,
        module = %engine.config().module,
        workdir = %engine.config().workdir.display(),
        "Search engine configured"
    );

    let store = DatasetStore::from_env();
    info!(datasets_dir = %store.dir().display(), "Dataset store configured");

    let state = AppState {
        engine: Arc::new(engine),
        store: Arc::new(store),
        schema: Arc::new(schema),
    };

    // Get server configuration from environment
    let host = std::env::var(defaults::ENV_HOST)
        .unwrap_or_else(|_| defaults::SERVER_HOST.to_string());
    let port: u16 = std::env::var(defaults::ENV_APP_PORT)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(defaults::SERVER_PORT);
    let cors_enabled = std::env::var(defaults::ENV_CORS_ENABLED)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    let app = build_router(state, cors_enabled);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, cors = cors_enabled, "findry-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
