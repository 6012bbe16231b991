//! Schema node types and their builders

use super::{PATH_PREFIX, UNCOLLAPSE_SUFFIX};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A classified schema fragment
#[derive(Clone)]
pub enum Schema {
    /// Number, boolean, null or a string that is not a path
    Literal(Value),
    /// A `$.` path reference
    Path(PathRef),
    /// An object carrying an `@path` directive
    Value(ValueNode),
    /// Any other object; fields keep the schema's key order
    Object(Vec<(String, Schema)>),
    /// An array; generators may only appear here
    Array(Vec<ArrayEntry>),
}

/// Entry of a schema array
#[derive(Clone, Debug)]
pub enum ArrayEntry {
    Item(Schema),
    Generator(GeneratorNode),
}

/// A path expression as written in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRef {
    raw: String,
    expression: String,
    collapse: bool,
}

impl PathRef {
    /// Recognise a path reference; `None` when `raw` lacks the `$.` prefix
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.starts_with(PATH_PREFIX) {
            return None;
        }
        let (expression, collapse) = match raw.strip_suffix(UNCOLLAPSE_SUFFIX) {
            Some(stripped) => (stripped, false),
            None => (raw, true),
        };
        Some(Self {
            raw: raw.to_string(),
            expression: expression.to_string(),
            collapse,
        })
    }

    /// The string exactly as it appeared in the schema
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The expression handed to the path evaluator
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Whether single-element results collapse to a scalar
    pub fn collapse(&self) -> bool {
        self.collapse
    }
}

/// Context handed to a transform hook
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// The whole source document
    pub source: &'a Value,
    /// The value node's `@path`, unmodified
    pub path: &'a str,
}

/// Post-processing hook on a value node
///
/// Called with the resolved value (after defaulting), the target value that
/// already occupies this position, and a [`TransformContext`]. Returning
/// `Ok(None)` drops the field.
pub type Transform = Arc<
    dyn Fn(Option<Value>, Option<&Value>, &TransformContext<'_>) -> anyhow::Result<Option<Value>>
        + Send
        + Sync,
>;

/// `{"@path": ..., "@default": ...}` plus an optional programmatic transform
#[derive(Clone)]
pub struct ValueNode {
    pub path: String,
    pub default: Option<Box<Schema>>,
    pub transform: Option<Transform>,
}

impl ValueNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default: None,
            transform: None,
        }
    }

    /// Schema resolved when the path yields nothing
    pub fn with_default(mut self, default: impl Into<Schema>) -> Self {
        self.default = Some(Box::new(default.into()));
        self
    }

    /// Attach a transform hook
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Option<Value>, Option<&Value>, &TransformContext<'_>) -> anyhow::Result<Option<Value>>
            + Send
            + Sync
            + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }
}

impl fmt::Debug for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueNode")
            .field("path", &self.path)
            .field("default", &self.default)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// How a generator field extends a shorter sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Nothing past the end
    Empty,
    /// Repeat the last item
    Edge,
    /// Start over from the first item
    Wrap,
    /// Run back and forth: forward, backward, forward, ...
    Reflect,
}

impl FromStr for Padding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "empty" => Ok(Self::Empty),
            "edge" => Ok(Self::Edge),
            "wrap" => Ok(Self::Wrap),
            "reflect" => Ok(Self::Reflect),
            _ => Err(Error::configuration(
                "Unknown padding, expected empty, edge, wrap or reflect",
                s,
            )),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Edge => "edge",
            Self::Wrap => "wrap",
            Self::Reflect => "reflect",
        };
        f.write_str(name)
    }
}

/// One output field of a generator
#[derive(Clone, Debug)]
pub struct GeneratorField {
    pub name: String,
    pub schema: Schema,
    /// Only set for value nodes carrying `@padding`
    pub padding: Option<Padding>,
}

/// `{"@element": {...}, "@length": ...}` inside a schema array
#[derive(Clone, Debug, Default)]
pub struct GeneratorNode {
    pub fields: Vec<GeneratorField>,
    pub length: Option<Box<Schema>>,
}

impl GeneratorNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unpadded field
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push(GeneratorField {
            name: name.into(),
            schema: schema.into(),
            padding: None,
        });
        self
    }

    /// Add a value-node field with an explicit padding
    pub fn padded(mut self, name: impl Into<String>, node: ValueNode, padding: Padding) -> Self {
        self.fields.push(GeneratorField {
            name: name.into(),
            schema: Schema::Value(node),
            padding: Some(padding),
        });
        self
    }

    /// Fix the number of generated elements
    pub fn with_length(mut self, length: impl Into<Schema>) -> Self {
        self.length = Some(Box::new(length.into()));
        self
    }
}

impl Schema {
    /// Build an object schema from `(key, schema)` pairs
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Schema::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array schema from items and generators
    pub fn array<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ArrayEntry>,
    {
        Schema::Array(entries.into_iter().map(Into::into).collect())
    }

    /// Short name of the variant, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Literal(_) => "literal",
            Schema::Path(_) => "path",
            Schema::Value(_) => "value",
            Schema::Object(_) => "object",
            Schema::Array(_) => "array",
        }
    }

    /// Parse and classify a schema from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Schema::from(value))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Schema::Path(path) => f.debug_tuple("Path").field(&path.raw).finish(),
            Schema::Value(node) => f.debug_tuple("Value").field(node).finish(),
            Schema::Object(fields) => f.debug_map().entries(fields.iter().map(|(k, v)| (k, v))).finish(),
            Schema::Array(entries) => f.debug_list().entries(entries).finish(),
        }
    }
}

impl From<ValueNode> for Schema {
    fn from(node: ValueNode) -> Self {
        Schema::Value(node)
    }
}

impl From<&str> for Schema {
    fn from(s: &str) -> Self {
        Schema::from(Value::String(s.to_string()))
    }
}

impl From<Schema> for ArrayEntry {
    fn from(schema: Schema) -> Self {
        ArrayEntry::Item(schema)
    }
}

impl From<GeneratorNode> for ArrayEntry {
    fn from(node: GeneratorNode) -> Self {
        ArrayEntry::Generator(node)
    }
}
