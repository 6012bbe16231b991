//! Typed schema model
//!
//! A schema is JSON extended with directive keys. [`Schema::from`] classifies a
//! raw [`Value`] into this closed tree once, so the mapper can match on shape
//! exhaustively instead of inspecting raw JSON at every step.

mod classify;
mod types;

pub use types::{
    ArrayEntry, GeneratorField, GeneratorNode, Padding, PathRef, Schema, Transform, TransformContext,
    ValueNode,
};

/// Prefix that marks a string as a path expression
pub const PATH_PREFIX: &str = "$.";

/// Leading character that forces a string to be read literally
pub const ESCAPE_MARKER: char = '`';

/// Suffix on a path expression that disables single-match collapsing
pub const UNCOLLAPSE_SUFFIX: &str = "[]";

/// Reserved directive keys
pub mod directive {
    pub const PATH: &str = "@path";
    pub const DEFAULT: &str = "@default";
    pub const ELEMENT: &str = "@element";
    pub const LENGTH: &str = "@length";
    pub const PADDING: &str = "@padding";
}

/// Strip one leading escape marker, if present
pub fn unescape(s: &str) -> &str {
    s.strip_prefix(ESCAPE_MARKER).unwrap_or(s)
}

/// Escape a string so it is read back literally, as a value or as an object key
///
/// Strings that could be mistaken for a path, a directive or an already
/// escaped string get one marker prepended; anything else is returned as is.
pub fn escape(s: &str) -> String {
    if s.starts_with(PATH_PREFIX) || s.starts_with(ESCAPE_MARKER) || s.starts_with('@') {
        format!("{}{}", ESCAPE_MARKER, s)
    } else {
        s.to_string()
    }
}
