//! Error types for the jsonmorph core library
//!
//! Mapping favours absence over failure: an unmatched path resolves to "no
//! value" and is never reported here. The errors below cover the few cases
//! that abort a mapping call.

use crate::jsonpath::JSONPathError;
use thiserror::Error;

/// Main error type for jsonmorph operations
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied transform hook failed
    #[error("Transform failed for path '{path}': {source}")]
    Transform {
        /// The `@path` expression of the value node whose hook failed
        path: String,
        /// The error returned by the hook, unchanged
        #[source]
        source: anyhow::Error,
    },

    /// A path expression could not be parsed or evaluated
    #[error("JSONPath error: {0}")]
    JsonPath(#[from] JSONPathError),

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        value: Option<String>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for an unrecognised option value
    pub fn configuration(message: impl Into<String>, value: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// Returns the transform hook's own error, if this error came from one
    pub fn transform_source(&self) -> Option<&anyhow::Error> {
        match self {
            Error::Transform { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
