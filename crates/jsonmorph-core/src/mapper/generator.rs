//! Expansion of `@element` generators into concrete array elements

use super::padding::field_value;
use super::Mapper;
use crate::evaluator::PathEvaluator;
use crate::schema::GeneratorNode;
use crate::Result;
use serde_json::{Map, Value};

impl<E: PathEvaluator> Mapper<E> {
    /// Expand a generator into its output elements
    ///
    /// Every field resolves once against `target`. The element count is the
    /// longest array among the fields (scalars count as one) unless `@length`
    /// resolves to a usable count.
    pub(super) fn expand_generator(
        &self,
        source: &Value,
        target: Option<&Value>,
        node: &GeneratorNode,
    ) -> Result<Vec<Value>> {
        let mut resolved = Vec::with_capacity(node.fields.len());
        for field in &node.fields {
            resolved.push(self.map_any(source, target, &field.schema)?);
        }

        let mut count = resolved
            .iter()
            .map(|value| match value {
                Some(Value::Array(items)) => items.len(),
                _ => 1,
            })
            .max()
            .unwrap_or(0);

        if let Some(length) = &node.length {
            match self.map_any(source, None, length)? {
                Some(value) => match explicit_length(&value) {
                    Some(n) => count = n,
                    None => log::warn!("Ignoring @length {}, expected a non-negative integer or an array", value),
                },
                None => log::debug!("@length resolved to nothing, keeping inferred length {}", count),
            }
        }

        log::debug!("Expanding generator with {} fields into {} elements", node.fields.len(), count);

        let elements = (0..count)
            .map(|index| {
                let mut element = Map::new();
                for (field, value) in node.fields.iter().zip(&resolved) {
                    if let Some(item) = field_value(field.padding, value.as_ref(), index) {
                        element.insert(field.name.clone(), item.clone());
                    }
                }
                Value::Object(element)
            })
            .collect();

        Ok(elements)
    }
}

/// Element count requested by a resolved `@length`
fn explicit_length(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Number(n) => match n.as_u64() {
            Some(count) => usize::try_from(count).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= usize::MAX as f64)
                .map(|f| f as usize),
        },
        _ => None,
    }
}
