//! jsonmorph Core - Schema-driven JSON-to-JSON mapping
//!
//! A schema is a JSON-shaped template. Strings starting with `$.` are path
//! references into the source document, objects and arrays are rebuilt
//! recursively, and everything else is copied through. The result can be
//! merged into an existing target document under configurable merge policies.
//!
//! # Main Components
//!
//! - **Schema**: classification of raw JSON templates into [`Schema`] nodes
//! - **JSONPath**: the built-in path engine used to query source documents
//! - **Mapper**: the interpreter that walks a schema and produces output
//! - **Merge**: structural deep merge with object and array policies
//!
//! # Example
//!
//! ```
//! use jsonmorph_core::{map, MapOptions, Schema};
//! use serde_json::json;
//!
//! # fn main() -> jsonmorph_core::Result<()> {
//! let source = json!({"animals": [{"name": "Max", "species": "dog"}]});
//! let schema = Schema::from(json!({"pet": {"name": "$.animals[0].name", "kind": "animal"}}));
//!
//! let result = map(&source, &schema, None, MapOptions::default())?;
//! assert_eq!(result, Some(json!({"pet": {"name": "Max", "kind": "animal"}})));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod evaluator;
pub mod jsonpath;
pub mod mapper;
pub mod merge;
pub mod options;
pub mod schema;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use evaluator::{JsonPathEvaluator, PathEvaluator};
pub use jsonpath::JSONPath;
pub use mapper::{Mapper, ValueKey};
pub use merge::deep_merge;
pub use options::{ArrayMergeMode, MapOptions, MergeOptions, ObjectMergeMode};
pub use schema::{
    ArrayEntry, GeneratorField, GeneratorNode, Padding, PathRef, Schema, Transform, TransformContext, ValueNode,
};

use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Map `source` through `schema`, merging into `target` when given
///
/// Returns `Ok(None)` when the schema resolves to no value at all, for
/// example a top-level path that matches nothing. Missing options fall back
/// to `overwrite` objects and `replace` arrays.
pub fn map(source: &Value, schema: &Schema, target: Option<&Value>, options: MapOptions) -> Result<Option<Value>> {
    Mapper::new().with_options(options).map(source, schema, target)
}

/// Resolve a single path string or value node against `source`
pub fn value(source: &Value, key: impl Into<ValueKey>) -> Result<Option<Value>> {
    Mapper::new().value(source, key)
}
