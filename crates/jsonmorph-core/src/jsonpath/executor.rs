//! JSONPath expression executor
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

use super::ast::Expression;
use super::error::JSONPathError;
use super::selector::{create_selector_executor, SelectorExecutor};
use serde_json::Value;

/// Runs a parsed expression against a document
pub struct Executor {
    selectors: Vec<Box<dyn SelectorExecutor>>,
}

impl Executor {
    /// Build the selector pipeline for an expression
    pub fn new(expression: &Expression) -> Self {
        Self {
            selectors: expression.selectors.iter().map(create_selector_executor).collect(),
        }
    }

    /// Execute against `data`, returning every match in document order
    pub fn execute<'a>(&self, data: &'a Value) -> Result<Vec<&'a Value>, JSONPathError> {
        let mut current = vec![data];

        for selector in &self.selectors {
            current = selector.execute(current, data)?;
            if current.is_empty() {
                break;
            }
        }

        Ok(current)
    }
}
