//! Golden test infrastructure for the jsonmorph mapping engine
//!
//! Each corpus case bundles a source document, a schema and optionally a
//! target and merge options. The runner maps the case and compares the
//! outcome against a stored snapshot.

pub mod corpus;
pub mod diff;
pub mod runner;
pub mod snapshot;

use std::path::PathBuf;
use thiserror::Error;

pub use corpus::{CorpusManager, GoldenCase};
pub use diff::{DiffEngine, DiffOptions};
pub use runner::{GoldenTestRunner, TestResult};
pub use snapshot::{Snapshot, SnapshotManager};

/// Golden test error types
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),

    #[error("Corpus error: {0}")]
    CorpusError(String),

    #[error("Test failed: {0}")]
    TestFailed(String),
}

pub type Result<T> = std::result::Result<T, GoldenError>;

/// Configuration for golden tests
#[derive(Debug, Clone)]
pub struct GoldenConfig {
    /// Root directory for the case corpus
    pub corpus_dir: PathBuf,

    /// Directory for snapshots
    pub snapshot_dir: PathBuf,

    /// Whether to rewrite snapshots that no longer match
    pub update_snapshots: bool,

    /// Whether to create missing snapshots
    pub create_missing: bool,

    /// Diff options
    pub diff_options: DiffOptions,

    /// Verbose output
    pub verbose: bool,
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl Default for GoldenConfig {
    fn default() -> Self {
        let update_snapshots = env_flag("UPDATE_GOLDEN").unwrap_or(false);

        Self {
            corpus_dir: PathBuf::from("../../golden-corpus"),
            snapshot_dir: PathBuf::from("../../golden-corpus/snapshots"),
            update_snapshots,
            create_missing: update_snapshots,
            diff_options: DiffOptions::default(),
            verbose: false,
        }
    }
}

impl GoldenConfig {
    /// Create config from environment and defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(corpus_dir) = std::env::var("GOLDEN_CORPUS_DIR") {
            config.corpus_dir = PathBuf::from(corpus_dir);
        }

        if let Ok(snapshot_dir) = std::env::var("GOLDEN_SNAPSHOT_DIR") {
            config.snapshot_dir = PathBuf::from(snapshot_dir);
        }

        if let Some(verbose) = env_flag("GOLDEN_VERBOSE") {
            config.verbose = verbose;
        }

        config
    }
}

/// Macro for defining a golden test for one `category/name` case
#[macro_export]
macro_rules! golden_test {
    ($name:ident, $case:expr) => {
        #[test]
        fn $name() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let runner = GoldenTestRunner::new(GoldenConfig::from_env());
            if let Err(err) = runner.run_case($case) {
                panic!("Golden test failed: {}: {}", $case, err);
            }
        }
    };
}

/// Macro for running every case whose name or category contains a pattern
#[macro_export]
macro_rules! golden_test_batch {
    ($name:ident, $pattern:expr) => {
        #[test]
        fn $name() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let runner = GoldenTestRunner::new(GoldenConfig::from_env());
            if let Err(err) = runner.run_batch($pattern) {
                panic!("Golden test batch failed: {}: {}", $pattern, err);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        let config = GoldenConfig::from_env();
        assert!(!config.corpus_dir.as_os_str().is_empty());
        assert!(!config.snapshot_dir.as_os_str().is_empty());
    }
}
