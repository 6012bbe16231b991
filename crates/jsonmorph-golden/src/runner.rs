//! Golden test runner for executing snapshot tests

use crate::{
    corpus::{CorpusManager, GoldenCase},
    diff::DiffEngine,
    snapshot::{apply_ignores, SnapshotManager},
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use jsonmorph_core::{map, Schema};
use serde_json::{json, Value};
use std::time::Instant;

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    /// `category/name` of the case
    pub name: String,

    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    /// Execution time in milliseconds
    pub duration_ms: u64,

    /// Whether a snapshot was created or rewritten
    pub updated: bool,

    /// Whether the case was disabled and not run
    pub skipped: bool,
}

impl TestResult {
    /// Print the test result
    pub fn print(&self, verbose: bool) {
        let status = if self.skipped {
            "SKIP".yellow().bold()
        } else if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }

        if self.updated {
            println!("  {}", "Snapshot updated".yellow());
        }
    }
}

/// Outcome of one case before it is compared
struct CaseOutcome {
    passed: bool,
    error: Option<String>,
    diff: Option<String>,
    updated: bool,
}

impl CaseOutcome {
    fn pass(updated: bool) -> Self {
        Self {
            passed: true,
            error: None,
            diff: None,
            updated,
        }
    }
}

/// Snapshot content for a mapping result
///
/// A produced value is stored under `output` and a failure under `error`. A
/// mapping that produced nothing is stored as an empty object, which keeps it
/// distinct from an output of `null`.
pub fn outcome_value(result: &jsonmorph_core::Result<Option<Value>>) -> Value {
    match result {
        Ok(Some(value)) => json!({ "output": value }),
        Ok(None) => json!({}),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    snapshot_manager: SnapshotManager,
}

impl GoldenTestRunner {
    /// Create a new test runner
    pub fn new(config: GoldenConfig) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);
        let snapshot_manager = SnapshotManager::new(&config.snapshot_dir);

        Self {
            config,
            corpus_manager,
            snapshot_manager,
        }
    }

    /// Run a single case by its `category/name` id
    pub fn run_case(&self, id: &str) -> Result<TestResult> {
        let case = self.corpus_manager.load_by_id(id)?;
        let result = self.run_loaded(&case);

        if self.config.verbose {
            result.print(true);
        }

        if result.passed {
            Ok(result)
        } else {
            Err(GoldenError::TestFailed(format!(
                "Case '{}' failed: {}",
                id,
                result.error.as_deref().unwrap_or("Unknown error")
            )))
        }
    }

    /// Run every case whose id contains `pattern`, `*` runs all
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let cases = self.corpus_manager.discover_cases()?;

        let selected: Vec<_> = if pattern == "*" {
            cases
        } else {
            cases.into_iter().filter(|c| c.id().contains(pattern)).collect()
        };

        if selected.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No cases found matching pattern '{}'",
                pattern
            )));
        }

        println!("Running {} cases...\n", selected.len());

        let mut results = Vec::with_capacity(selected.len());
        let mut passed = 0;
        let mut failed = 0;

        for case in &selected {
            let result = self.run_loaded(case);

            if result.passed {
                passed += 1;
            } else {
                failed += 1;
            }

            result.print(self.config.verbose);
            results.push(result);
        }

        println!("\n{}", "=== Test Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            passed.to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            Err(GoldenError::TestFailed(format!("{} case(s) failed", failed)))
        } else {
            Ok(results)
        }
    }

    fn run_loaded(&self, case: &GoldenCase) -> TestResult {
        let start = Instant::now();
        let name = case.id();

        if !case.enabled {
            return TestResult {
                name,
                passed: true,
                error: None,
                diff: None,
                duration_ms: 0,
                updated: false,
                skipped: true,
            };
        }

        let outcome = self.execute_case(case).unwrap_or_else(|e| CaseOutcome {
            passed: false,
            error: Some(e.to_string()),
            diff: None,
            updated: false,
        });

        TestResult {
            name,
            passed: outcome.passed,
            error: outcome.error,
            diff: outcome.diff,
            duration_ms: start.elapsed().as_millis() as u64,
            updated: outcome.updated,
            skipped: false,
        }
    }

    /// Map the case and compare against its snapshot
    fn execute_case(&self, case: &GoldenCase) -> Result<CaseOutcome> {
        let schema = Schema::from(&case.schema);
        let result = map(&case.source, &schema, case.target.as_ref(), case.options);

        match (&result, case.error_pattern()?) {
            (Ok(_), Some(pattern)) => {
                return Err(GoldenError::TestFailed(format!(
                    "Expected an error matching '{}', but mapping succeeded",
                    pattern
                )));
            }
            (Err(err), Some(pattern)) if !pattern.is_match(&err.to_string()) => {
                return Err(GoldenError::TestFailed(format!(
                    "Error '{}' does not match '{}'",
                    err, pattern
                )));
            }
            (Err(err), None) => {
                return Err(GoldenError::TestFailed(format!("Mapping failed: {}", err)));
            }
            _ => {}
        }

        let actual = outcome_value(&result);
        let snapshot_name = case.id();

        if !self.snapshot_manager.exists(&snapshot_name) {
            if self.config.create_missing || self.config.update_snapshots {
                self.snapshot_manager
                    .create(&snapshot_name, actual, Some(case.description.clone()))?;
                return Ok(CaseOutcome::pass(true));
            }

            return Err(GoldenError::SnapshotMismatch(format!(
                "Snapshot '{}' does not exist. Run with UPDATE_GOLDEN=1 to create it.",
                snapshot_name
            )));
        }

        let snapshot = self.snapshot_manager.load(&snapshot_name)?;

        let mut expected = snapshot.content;
        let mut compared = actual.clone();
        apply_ignores(&mut expected, &case.ignore_fields);
        apply_ignores(&mut compared, &case.ignore_fields);

        let diff_engine = DiffEngine::new(self.config.diff_options.clone());
        let diff_result = diff_engine.compare(&expected, &compared);

        if diff_result.matches {
            Ok(CaseOutcome::pass(false))
        } else if self.config.update_snapshots {
            self.snapshot_manager.backup(&snapshot_name)?;
            self.snapshot_manager.update(&snapshot_name, actual)?;
            Ok(CaseOutcome {
                passed: true,
                error: None,
                diff: Some(diff_result.diff_output),
                updated: true,
            })
        } else {
            Ok(CaseOutcome {
                passed: false,
                error: Some(format!(
                    "Snapshot mismatch at {}",
                    diff_result.summary.differing_paths.join(", ")
                )),
                diff: Some(diff_result.diff_output),
                updated: false,
            })
        }
    }

    /// List all case ids
    pub fn list_cases(&self) -> Result<Vec<String>> {
        let cases = self.corpus_manager.discover_cases()?;
        Ok(cases.iter().map(GoldenCase::id).collect())
    }

    /// Print corpus statistics
    pub fn print_statistics(&self) -> Result<()> {
        let stats = self.corpus_manager.get_statistics()?;
        stats.print();
        Ok(())
    }
}
