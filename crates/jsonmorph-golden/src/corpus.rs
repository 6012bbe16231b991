//! Case corpus management for golden tests
//!
//! A case lives at `<corpus>/<category>/<name>/case.json`. Category and name
//! come from the directory layout, not from the file.

use crate::{GoldenError, Result};
use jsonmorph_core::MapOptions;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name that marks a case directory
pub const CASE_FILE: &str = "case.json";

/// A mapping case in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenCase {
    /// Directory name of the case
    #[serde(skip)]
    pub name: String,

    /// Path of the case's parent directory relative to the corpus root
    #[serde(skip)]
    pub category: String,

    /// What this case exercises
    pub description: String,

    /// Document the schema reads from
    pub source: Value,

    /// Raw schema, classified when the case runs
    pub schema: Value,

    /// Existing document to merge into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,

    #[serde(default)]
    pub options: MapOptions,

    /// Regex the error message must match when the case is expected to fail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<String>,

    /// Dotted paths removed from both sides before comparison
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_fields: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl GoldenCase {
    /// `category/name`, also used as the snapshot name
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }

    /// Compiled `expect_error` pattern
    pub fn error_pattern(&self) -> Result<Option<Regex>> {
        self.expect_error
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| GoldenError::CorpusError(format!("Invalid expect_error pattern in {}: {}", self.id(), e)))
            })
            .transpose()
    }
}

/// Manages the case corpus
pub struct CorpusManager {
    corpus_dir: PathBuf,
}

impl CorpusManager {
    /// Create a new corpus manager
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
        }
    }

    /// Discover all cases in the corpus, sorted by id
    pub fn discover_cases(&self) -> Result<Vec<GoldenCase>> {
        let mut cases = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(cases);
        }

        for entry in WalkDir::new(&self.corpus_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && path.file_name() == Some(std::ffi::OsStr::new(CASE_FILE)) {
                match self.load_case(path) {
                    Ok(case) => cases.push(case),
                    Err(e) => {
                        eprintln!("Warning: Failed to load case {:?}: {}", path, e);
                    }
                }
            }
        }

        cases.sort_by_key(GoldenCase::id);

        Ok(cases)
    }

    /// Load the case stored at `path`
    pub fn load_case(&self, path: &Path) -> Result<GoldenCase> {
        let content = fs::read_to_string(path)?;
        let mut case: GoldenCase = serde_json::from_str(&content)?;

        let case_dir = path
            .parent()
            .ok_or_else(|| GoldenError::CorpusError(format!("Case file {:?} has no directory", path)))?;
        let relative = case_dir.strip_prefix(&self.corpus_dir).unwrap_or(case_dir);

        let mut parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        case.name = parts
            .pop()
            .ok_or_else(|| GoldenError::CorpusError(format!("Case file {:?} is not inside a case directory", path)))?;
        case.category = if parts.is_empty() {
            "default".to_string()
        } else {
            parts.join("/")
        };

        Ok(case)
    }

    /// Load a case by its `category/name` id
    pub fn load_by_id(&self, id: &str) -> Result<GoldenCase> {
        self.load_case(&self.corpus_dir.join(id).join(CASE_FILE))
    }

    /// Filter cases by category, `*` matches all
    pub fn filter_by_category(&self, cases: Vec<GoldenCase>, category: &str) -> Vec<GoldenCase> {
        cases
            .into_iter()
            .filter(|c| c.category == category || category == "*")
            .collect()
    }

    /// Keep cases carrying any of `tags`
    pub fn filter_by_tags(&self, cases: Vec<GoldenCase>, tags: &[String]) -> Vec<GoldenCase> {
        if tags.is_empty() {
            return cases;
        }

        cases
            .into_iter()
            .filter(|c| tags.iter().any(|tag| c.tags.contains(tag)))
            .collect()
    }

    pub fn filter_enabled(&self, cases: Vec<GoldenCase>) -> Vec<GoldenCase> {
        cases.into_iter().filter(|c| c.enabled).collect()
    }

    /// List all case categories
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = self.discover_cases()?.into_iter().map(|c| c.category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Get statistics about the corpus
    pub fn get_statistics(&self) -> Result<CorpusStatistics> {
        let cases = self.discover_cases()?;

        let mut stats = CorpusStatistics {
            total_cases: cases.len(),
            ..Default::default()
        };

        for case in cases {
            if case.enabled {
                stats.enabled_cases += 1;
            } else {
                stats.disabled_cases += 1;
            }

            *stats.cases_by_category.entry(case.category).or_insert(0) += 1;

            for tag in case.tags {
                *stats.cases_by_tag.entry(tag).or_insert(0) += 1;
            }
        }

        Ok(stats)
    }
}

/// Statistics about the case corpus
#[derive(Debug, Default)]
pub struct CorpusStatistics {
    pub total_cases: usize,
    pub enabled_cases: usize,
    pub disabled_cases: usize,
    pub cases_by_category: HashMap<String, usize>,
    pub cases_by_tag: HashMap<String, usize>,
}

impl CorpusStatistics {
    /// Print statistics to stdout
    pub fn print(&self) {
        println!("=== Corpus Statistics ===");
        println!("Total cases: {}", self.total_cases);
        println!("Enabled: {}", self.enabled_cases);
        println!("Disabled: {}", self.disabled_cases);

        if !self.cases_by_category.is_empty() {
            println!("\nCases by category:");
            let mut categories: Vec<_> = self.cases_by_category.iter().collect();
            categories.sort_by_key(|(k, _)| k.as_str());
            for (category, count) in categories {
                println!("  {}: {}", category, count);
            }
        }

        if !self.cases_by_tag.is_empty() {
            println!("\nCases by tag:");
            let mut tags: Vec<_> = self.cases_by_tag.iter().collect();
            tags.sort_by_key(|(k, _)| k.as_str());
            for (tag, count) in tags {
                println!("  {}: {}", tag, count);
            }
        }
    }
}
