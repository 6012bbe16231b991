//! Plain object mapping and merging into the target

use super::Mapper;
use crate::evaluator::PathEvaluator;
use crate::merge::{combinator_for, deep_merge, ArrayCombinator};
use crate::options::ObjectMergeMode;
use crate::schema::{unescape, Schema};
use crate::Result;
use serde_json::{Map, Value};

impl<E: PathEvaluator> Mapper<E> {
    /// Map every field of an object schema, then merge with the target object
    pub(super) fn map_object(
        &self,
        source: &Value,
        target: Option<&Value>,
        fields: &[(String, Schema)],
    ) -> Result<Value> {
        let base = match target {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        };

        let mut computed = Map::new();
        for (key, schema) in fields {
            let key = unescape(key);
            let field_target = base.and_then(|map| map.get(key));
            if let Some(value) = self.map_any(source, field_target, schema)? {
                computed.insert(key.to_string(), value);
            }
        }

        let base = base.cloned().unwrap_or_default();
        let combine: &ArrayCombinator = &combinator_for(&self.options);

        let merged = match self.options.object_merge_mode {
            ObjectMergeMode::Overwrite => deep_merge(base, computed, Some(combine)),
            ObjectMergeMode::Preserve => deep_merge(computed, base, Some(combine)),
            ObjectMergeMode::Replace => computed,
        };

        Ok(Value::Object(merged))
    }
}
