//! Array mapping and merging into the target

use super::Mapper;
use crate::evaluator::PathEvaluator;
use crate::options::ArrayMergeMode;
use crate::schema::ArrayEntry;
use crate::Result;
use serde_json::Value;

impl<E: PathEvaluator> Mapper<E> {
    /// Map every entry of an array schema, then combine with the target array
    ///
    /// Entry `i` sees the target's item `i` as its context. Items that resolve
    /// to nothing are dropped; generators contribute any number of elements.
    pub(super) fn map_array(&self, source: &Value, target: Option<&Value>, entries: &[ArrayEntry]) -> Result<Value> {
        let base: &[Value] = match target {
            Some(Value::Array(items)) => items,
            _ => &[],
        };

        let mut computed = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let context = base.get(i);
            match entry {
                ArrayEntry::Item(schema) => {
                    if let Some(value) = self.map_any(source, context, schema)? {
                        computed.push(value);
                    }
                }
                ArrayEntry::Generator(node) => {
                    computed.extend(self.expand_generator(source, context, node)?);
                }
            }
        }

        let merged = match self.options.array_merge_mode {
            ArrayMergeMode::Replace => computed,
            ArrayMergeMode::Append => base.iter().cloned().chain(computed).collect(),
            ArrayMergeMode::Prepend => computed.into_iter().chain(base.iter().cloned()).collect(),
        };

        Ok(Value::Array(merged))
    }
}
