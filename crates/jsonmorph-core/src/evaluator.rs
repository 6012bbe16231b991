//! Path evaluation seam between the mapper and a query engine

use crate::jsonpath::JSONPath;
use crate::Result;
use serde_json::Value;

/// Evaluates a path expression against a document
///
/// Implementations return matches in document order and an empty list when
/// nothing matches. Errors are reserved for expressions that cannot be
/// evaluated at all.
pub trait PathEvaluator {
    fn evaluate(&self, path: &str, document: &Value) -> Result<Vec<Value>>;
}

/// The built-in JSONPath engine
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathEvaluator;

impl PathEvaluator for JsonPathEvaluator {
    fn evaluate(&self, path: &str, document: &Value) -> Result<Vec<Value>> {
        let jsonpath = JSONPath::parse(path)?;
        Ok(jsonpath.execute_owned(document)?)
    }
}

impl<F> PathEvaluator for F
where
    F: Fn(&str, &Value) -> Result<Vec<Value>>,
{
    fn evaluate(&self, path: &str, document: &Value) -> Result<Vec<Value>> {
        self(path, document)
    }
}
