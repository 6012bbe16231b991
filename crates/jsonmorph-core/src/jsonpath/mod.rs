//! JSONPath query engine used to pull values out of source documents
//!
//! Supports dot and bracket member access, array indices (including negative
//! ones), slices, wildcards, recursive descent, unions and `[?(...)]` filters
//! with comparison, logical, regex (`=~`) and membership (`in`) operators.
//!
//! A query that matches nothing is not an error: it yields an empty list.
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

pub mod ast;
pub mod error;
pub mod executor;
pub mod filter;
pub mod parser;
pub mod selector;

pub use ast::{Expression, Selector};
pub use error::JSONPathError;
pub use executor::Executor;
pub use parser::Parser;

use serde_json::Value;

type PathResult<T> = std::result::Result<T, JSONPathError>;

/// A parsed JSONPath expression, reusable across documents
#[derive(Debug, Clone)]
pub struct JSONPath {
    expression: Expression,
}

impl JSONPath {
    /// Parse a JSONPath expression
    pub fn parse(path: &str) -> PathResult<Self> {
        let expression = Parser::new(path)?.parse()?;
        Ok(Self { expression })
    }

    /// Execute the JSONPath against the given data
    pub fn execute<'a>(&self, data: &'a Value) -> PathResult<Vec<&'a Value>> {
        Executor::new(&self.expression).execute(data)
    }

    /// Execute and return the first match, if any
    pub fn execute_single<'a>(&self, data: &'a Value) -> PathResult<Option<&'a Value>> {
        Ok(self.execute(data)?.into_iter().next())
    }

    /// Execute and collect results into owned values
    pub fn execute_owned(&self, data: &Value) -> PathResult<Vec<Value>> {
        Ok(self.execute(data)?.into_iter().cloned().collect())
    }

    /// Check if the path matches anything in the data
    pub fn exists(&self, data: &Value) -> PathResult<bool> {
        Ok(!self.execute(data)?.is_empty())
    }

    /// Get the parsed expression for inspection
    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl std::fmt::Display for JSONPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Convenient functions for direct JSONPath operations
pub fn select<'a>(path: &str, data: &'a Value) -> PathResult<Vec<&'a Value>> {
    JSONPath::parse(path)?.execute(data)
}

pub fn select_single<'a>(path: &str, data: &'a Value) -> PathResult<Option<&'a Value>> {
    JSONPath::parse(path)?.execute_single(data)
}

/// Like [`select`], but clones the matches out of `data`
pub fn select_owned(path: &str, data: &Value) -> PathResult<Vec<Value>> {
    JSONPath::parse(path)?.execute_owned(data)
}

pub fn exists(path: &str, data: &Value) -> PathResult<bool> {
    JSONPath::parse(path)?.exists(data)
}

#[cfg(test)]
mod prop_tests;
