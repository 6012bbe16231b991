//! Diff engine for comparing mapping outcomes against snapshots

use colored::*;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;

/// Options for diff comparison
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Whether to use colored output
    pub colored: bool,

    /// Unchanged lines shown around each change
    pub context_lines: usize,

    /// Tolerance for floating point comparison
    pub float_tolerance: f64,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            context_lines: 3,
            float_tolerance: 1e-9,
            max_diff_lines: 100,
        }
    }
}

/// Result of a diff operation
#[derive(Debug)]
pub struct DiffResult {
    pub matches: bool,

    /// Human-readable line diff, empty when the values match
    pub diff_output: String,

    pub summary: DiffSummary,
}

/// Summary of diff changes
#[derive(Debug, Default)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,

    /// Paths that differ, e.g. `dst.items[2].label`
    pub differing_paths: Vec<String>,
}

/// Engine for comparing JSON values
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare two JSON values
    pub fn compare(&self, expected: &Value, actual: &Value) -> DiffResult {
        if self.values_match(expected, actual) {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                summary: DiffSummary::default(),
            };
        }

        let expected_text = pretty(expected);
        let actual_text = pretty(actual);
        let text_diff = TextDiff::from_lines(&expected_text, &actual_text);

        let mut summary = DiffSummary::default();
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => summary.removed += 1,
                ChangeTag::Insert => summary.added += 1,
                ChangeTag::Equal => {}
            }
        }
        self.collect_diff_paths(expected, actual, String::new(), &mut summary.differing_paths);

        DiffResult {
            matches: false,
            diff_output: self.render(&text_diff),
            summary,
        }
    }

    /// Structural equality with float tolerance
    fn values_match(&self, expected: &Value, actual: &Value) -> bool {
        match (expected, actual) {
            (Value::Object(exp), Value::Object(act)) => {
                exp.len() == act.len()
                    && exp
                        .iter()
                        .all(|(key, exp_val)| act.get(key).is_some_and(|act_val| self.values_match(exp_val, act_val)))
            }
            (Value::Array(exp), Value::Array(act)) => {
                exp.len() == act.len() && exp.iter().zip(act).all(|(e, a)| self.values_match(e, a))
            }
            (Value::Number(exp), Value::Number(act)) => match (exp.as_f64(), act.as_f64()) {
                (Some(e), Some(a)) if exp.is_f64() || act.is_f64() => (e - a).abs() <= self.options.float_tolerance,
                _ => exp == act,
            },
            (exp, act) => exp == act,
        }
    }

    fn render(&self, text_diff: &TextDiff<'_, '_, '_, str>) -> String {
        let mut output = String::new();
        let header = "=== Diff Output ===\n";
        if self.options.colored {
            output.push_str(&header.bold().to_string());
        } else {
            output.push_str(header);
        }

        let mut line_count = 0;
        for group in text_diff.grouped_ops(self.options.context_lines) {
            for op in group {
                for change in text_diff.iter_changes(&op) {
                    if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                        output.push_str("... (diff truncated) ...\n");
                        return output;
                    }

                    let (sign, line) = match change.tag() {
                        ChangeTag::Delete => ("-", change.to_string()),
                        ChangeTag::Insert => ("+", change.to_string()),
                        ChangeTag::Equal => (" ", change.to_string()),
                    };
                    let rendered = match (self.options.colored, change.tag()) {
                        (true, ChangeTag::Delete) => format!("{}{}", sign.red(), line.red()),
                        (true, ChangeTag::Insert) => format!("{}{}", sign.green(), line.green()),
                        _ => format!("{}{}", sign, line),
                    };
                    output.push_str(&rendered);
                    line_count += 1;
                }
            }
        }

        output
    }

    /// Recursively collect paths that differ
    fn collect_diff_paths(&self, expected: &Value, actual: &Value, path: String, paths: &mut Vec<String>) {
        match (expected, actual) {
            (Value::Object(exp), Value::Object(act)) => {
                let all_keys: BTreeSet<_> = exp.keys().chain(act.keys()).collect();

                for key in all_keys {
                    let new_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };

                    match (exp.get(key), act.get(key)) {
                        (Some(exp_val), Some(act_val)) => {
                            if !self.values_match(exp_val, act_val) {
                                self.collect_diff_paths(exp_val, act_val, new_path, paths);
                            }
                        }
                        (Some(_), None) => paths.push(format!("{} (missing in actual)", new_path)),
                        (None, Some(_)) => paths.push(format!("{} (extra in actual)", new_path)),
                        (None, None) => {}
                    }
                }
            }
            (Value::Array(exp), Value::Array(act)) => {
                for (i, (exp_val, act_val)) in exp.iter().zip(act.iter()).enumerate() {
                    if !self.values_match(exp_val, act_val) {
                        self.collect_diff_paths(exp_val, act_val, format!("{}[{}]", path, i), paths);
                    }
                }

                if exp.len() != act.len() {
                    paths.push(format!("{} (array length mismatch: {} vs {})", path, exp.len(), act.len()));
                }
            }
            _ => paths.push(path),
        }
    }
}

fn pretty(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    text.push('\n');
    text
}
