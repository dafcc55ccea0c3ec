//! Search process lifecycle: spawn, capture, classify.
//!
//! One invocation is one spawn-to-exit lifecycle. Invocations hold no shared
//! state and may run concurrently as independent processes; there is no
//! queue, no deduplication, no concurrency cap, and no retry at this layer.
//! No timeout either: a hung process holds its request pending.

use std::path::Path;
use std::process::Stdio;
use std::time::Instant;

use serde_json::Value as JsonValue;
use tokio::process::Command;
use tracing::{debug, warn};

use findry_core::{Error, Result};

/// Spawn the search process and resolve to its parsed JSON payload or a
/// classified failure.
///
/// stdin is closed; stdout and stderr are captured as UTF-8 until the
/// process terminates. Classification:
/// - spawn failure → [`Error::Spawn`], reported without waiting
/// - non-zero exit → [`Error::Process`] with the exit code and captured
///   stderr (stdout when stderr is empty)
/// - exit 0 with non-JSON stdout → [`Error::MalformedOutput`] carrying both
///   streams for diagnostics
pub async fn invoke(program: &str, args: &[String], workdir: &Path) -> Result<JsonValue> {
    let started = Instant::now();

    let child = Command::new(program)
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Spawn(format!("{program}: {e}")))?;

    let output = child.wait_with_output().await?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let exit_code = output.status.code();
        warn!(
            exit_code = ?exit_code,
            duration_ms = started.elapsed().as_millis() as u64,
            "search process exited with failure"
        );
        let diagnostic = if stderr.trim().is_empty() {
            stdout
        } else {
            stderr
        };
        return Err(Error::Process {
            exit_code,
            diagnostic: diagnostic.trim().to_string(),
        });
    }

    match serde_json::from_str(stdout.trim()) {
        Ok(payload) => {
            debug!(
                duration_ms = started.elapsed().as_millis() as u64,
                "search process completed"
            );
            Ok(payload)
        }
        Err(_) => Err(Error::MalformedOutput { stdout, stderr }),
    }
}
