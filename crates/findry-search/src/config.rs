//! Search process configuration.

use std::path::PathBuf;

use findry_core::defaults;

/// How the external search process is invoked: which interpreter, which
/// module, and from which working directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interpreter binary (e.g. `python3` or an absolute path).
    pub bin: String,
    /// Module identifier passed via `-m`.
    pub module: String,
    /// Working directory the process is spawned in.
    pub workdir: PathBuf,
}

impl EngineConfig {
    pub fn new(bin: impl Into<String>, module: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            module: module.into(),
            workdir: workdir.into(),
        }
    }

    /// Create from environment variables.
    ///
    /// `SEARCH_BIN` → interpreter (default `python3`), `SEARCH_MODULE` →
    /// module (default `search.query`), `SEARCH_WORKDIR` → working directory
    /// (default: the parent of the current directory, where the search
    /// package and its data live in the standard deployment layout).
    pub fn from_env() -> Self {
        let bin = std::env::var(defaults::ENV_SEARCH_BIN)
            .unwrap_or_else(|_| defaults::SEARCH_BIN.to_string());
        let module = std::env::var(defaults::ENV_SEARCH_MODULE)
            .unwrap_or_else(|_| defaults::SEARCH_MODULE.to_string());
        let workdir = std::env::var(defaults::ENV_SEARCH_WORKDIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_workdir());

        Self { bin, module, workdir }
    }
}

fn default_workdir() -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(".."))
        .unwrap_or_else(|_| PathBuf::from(".."))
}
