//! Resolution of literals, path references and value nodes

use super::Mapper;
use crate::evaluator::PathEvaluator;
use crate::schema::{unescape, PathRef, TransformContext, ValueNode};
use crate::{Error, Result};
use serde_json::Value;

/// Literal strings lose one leading escape marker; other literals are returned as is
pub(super) fn resolve_literal(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(unescape(s).to_string()),
        other => other.clone(),
    }
}

impl<E: PathEvaluator> Mapper<E> {
    /// Evaluate a path reference and apply the collapse rule
    pub(super) fn resolve_path(&self, source: &Value, path: &PathRef) -> Result<Option<Value>> {
        let mut matches = self.evaluator.evaluate(path.expression(), source)?;

        if !path.collapse() {
            return Ok(Some(Value::Array(matches)));
        }

        match matches.len() {
            0 => {
                log::trace!("Path '{}' matched nothing", path.raw());
                Ok(None)
            }
            1 => Ok(matches.pop()),
            _ => Ok(Some(Value::Array(matches))),
        }
    }

    pub(super) fn resolve_value_node(
        &self,
        source: &Value,
        target: Option<&Value>,
        node: &ValueNode,
    ) -> Result<Option<Value>> {
        let mut resolved = match PathRef::parse(&node.path) {
            Some(path) => self.resolve_path(source, &path)?,
            None => Some(Value::String(unescape(&node.path).to_string())),
        };

        if resolved.is_none() {
            if let Some(default) = &node.default {
                log::trace!("Using @default for '{}'", node.path);
                resolved = self.map_any(source, target, default)?;
            }
        }

        match &node.transform {
            Some(transform) => {
                let context = TransformContext {
                    source,
                    path: &node.path,
                };
                (**transform)(resolved, target, &context).map_err(|err| Error::Transform {
                    path: node.path.clone(),
                    source: err,
                })
            }
            None => Ok(resolved),
        }
    }
}
