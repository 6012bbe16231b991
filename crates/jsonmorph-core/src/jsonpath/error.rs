//! Error types for JSONPath operations
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

use thiserror::Error;

/// JSONPath error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JSONPathError {
    /// Parse errors during JSONPath expression parsing
    #[error("Parse error at position {position}: {message}")]
    Parse {
        message: String,
        position: usize,
        input: String,
    },

    /// Syntax errors with detailed position information
    #[error("Syntax error at position {position}: {message} (expected {}, found '{found}')", expected.join(" or "))]
    Syntax {
        message: String,
        position: usize,
        input: String,
        expected: Vec<String>,
        found: String,
    },

    /// Type mismatch inside a filter expression
    #[error("Type mismatch: expected {expected}, found {found} in {context}")]
    TypeMismatch {
        expected: String,
        found: String,
        context: String,
    },

    /// Filter evaluation errors
    #[error("Filter evaluation failed: {message}")]
    FilterEvaluation {
        message: String,
        filter: String,
    },
}

impl JSONPathError {
    /// Create a parse error with position and input
    pub fn parse(message: impl Into<String>, position: usize, input: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            position,
            input: input.into(),
        }
    }

    /// Create a syntax error describing what was expected
    pub fn syntax(
        message: impl Into<String>,
        position: usize,
        input: impl Into<String>,
        expected: &[&str],
        found: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
            input: input.into(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: found.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        expected: impl Into<String>,
        found: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
            context: context.into(),
        }
    }

    /// Create a filter evaluation error
    pub fn filter_evaluation(message: impl Into<String>, filter: impl Into<String>) -> Self {
        Self::FilterEvaluation {
            message: message.into(),
            filter: filter.into(),
        }
    }

    /// Byte offset of the failure in the expression, for parse-time errors
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Parse { position, .. } | Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}
