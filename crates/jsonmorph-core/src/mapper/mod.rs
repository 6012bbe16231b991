//! Schema interpreter
//!
//! [`Mapper::map_any`] is the single dispatch point: every schema fragment, at
//! every depth, goes through it and on to the resolver, the object merger or
//! the array merger. The merge options live on the mapper and reach every
//! recursive call through `&self`.

mod array;
mod generator;
mod object;
mod padding;
mod resolver;


use crate::evaluator::{JsonPathEvaluator, PathEvaluator};
use crate::options::{MapOptions, MergeOptions};
use crate::schema::{Schema, ValueNode};
use crate::Result;
use serde_json::Value;

/// Reusable mapper holding merge options and a path evaluator
#[derive(Debug, Clone, Default)]
pub struct Mapper<E = JsonPathEvaluator> {
    evaluator: E,
    options: MergeOptions,
}

/// Key accepted by [`Mapper::value`]: a path string or a value node
#[derive(Debug, Clone)]
pub enum ValueKey {
    Path(String),
    Node(ValueNode),
}

impl From<&str> for ValueKey {
    fn from(path: &str) -> Self {
        ValueKey::Path(path.to_string())
    }
}

impl From<String> for ValueKey {
    fn from(path: String) -> Self {
        ValueKey::Path(path)
    }
}

impl From<ValueNode> for ValueKey {
    fn from(node: ValueNode) -> Self {
        ValueKey::Node(node)
    }
}

impl Mapper<JsonPathEvaluator> {
    /// Mapper with default options and the built-in JSONPath engine
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Mapper<E> {
    /// Replace the path evaluator
    pub fn with_evaluator<F: PathEvaluator>(self, evaluator: F) -> Mapper<F> {
        Mapper {
            evaluator,
            options: self.options,
        }
    }

    /// Set merge options; unspecified fields take their defaults
    pub fn with_options(mut self, options: impl Into<MapOptions>) -> Self {
        self.options = options.into().resolve();
        self
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }
}

impl<E: PathEvaluator> Mapper<E> {
    /// Map `source` through `schema`, merging into `target` when given
    ///
    /// Returns `None` only when the schema itself resolves to nothing, such
    /// as a top-level path that matches nothing.
    pub fn map(&self, source: &Value, schema: &Schema, target: Option<&Value>) -> Result<Option<Value>> {
        self.map_any(source, target, schema)
    }

    /// Resolve a single path or value node with no target context
    pub fn value(&self, source: &Value, key: impl Into<ValueKey>) -> Result<Option<Value>> {
        match key.into() {
            ValueKey::Path(path) => self.map_any(source, None, &Schema::from(path.as_str())),
            ValueKey::Node(node) => self.resolve_value_node(source, None, &node),
        }
    }

    /// Route one schema fragment to the resolver or a merger
    pub(crate) fn map_any(&self, source: &Value, target: Option<&Value>, schema: &Schema) -> Result<Option<Value>> {
        match schema {
            Schema::Literal(value) => Ok(Some(resolver::resolve_literal(value))),
            Schema::Path(path) => self.resolve_path(source, path),
            Schema::Value(node) => self.resolve_value_node(source, target, node),
            Schema::Object(fields) => self.map_object(source, target, fields).map(Some),
            Schema::Array(entries) => self.map_array(source, target, entries).map(Some),
        }
    }
}
