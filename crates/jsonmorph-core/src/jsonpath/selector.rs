//! Selector implementations for JSONPath traversal
//!
//! Each selector maps a list of input nodes to the list of nodes it selects,
//! preserving document order.
//!
//! Copyright (c) 2025 jsonmorph contributors
//! Licensed under MIT OR Apache-2.0

use super::ast::{Selector, SliceSelector as SliceBounds};
use super::error::JSONPathError;
use super::filter::{normalize_index, FilterExecutor};
use serde_json::Value;

type SelectResult<'a> = std::result::Result<Vec<&'a Value>, JSONPathError>;

/// Trait for selector execution
pub trait SelectorExecutor {
    /// Execute this selector on a set of input values; `root` is the document
    fn execute<'a>(&self, inputs: Vec<&'a Value>, root: &'a Value) -> SelectResult<'a>;
}

/// Direct children of a node in document order: array items or object member values
pub fn children(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

/// Property selector implementation
pub struct PropertySelector {
    pub key: String,
}

impl PropertySelector {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SelectorExecutor for PropertySelector {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, _root: &'a Value) -> SelectResult<'a> {
        Ok(inputs
            .into_iter()
            .filter_map(|value| value.as_object().and_then(|obj| obj.get(&self.key)))
            .collect())
    }
}

/// Array index selector implementation; negative indices count from the end
pub struct IndexSelector {
    pub index: i64,
}

impl IndexSelector {
    pub fn new(index: i64) -> Self {
        Self { index }
    }
}

impl SelectorExecutor for IndexSelector {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, _root: &'a Value) -> SelectResult<'a> {
        Ok(inputs
            .into_iter()
            .filter_map(|value| {
                let items = value.as_array()?;
                normalize_index(self.index, items.len()).and_then(|i| items.get(i))
            })
            .collect())
    }
}

/// Array slice selector implementation
pub struct SliceSelector {
    pub bounds: SliceBounds,
}

impl SliceSelector {
    pub fn new(bounds: SliceBounds) -> Self {
        Self { bounds }
    }

    /// Indices selected from an array of `length` items, in selection order
    fn indices(&self, length: usize) -> Vec<usize> {
        let len = length as i64;
        let step = self.bounds.step;
        let resolve = |bound: i64| if bound < 0 { bound + len } else { bound };
        let mut indices = Vec::new();

        if step > 0 {
            let start = self.bounds.start.map_or(0, resolve).clamp(0, len);
            let end = self.bounds.end.map_or(len, resolve).clamp(0, len);
            let mut i = start;
            while i < end {
                indices.push(i as usize);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        } else if step < 0 {
            let start = self.bounds.start.map_or(len - 1, resolve).clamp(-1, len - 1);
            let end = self.bounds.end.map_or(-1, resolve).clamp(-1, len - 1);
            let mut i = start;
            while i > end {
                indices.push(i as usize);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        }

        indices
    }
}

impl SelectorExecutor for SliceSelector {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, _root: &'a Value) -> SelectResult<'a> {
        let mut results = Vec::new();
        for value in inputs {
            if let Some(items) = value.as_array() {
                results.extend(self.indices(items.len()).into_iter().map(|i| &items[i]));
            }
        }
        Ok(results)
    }
}

/// Wildcard selector implementation
pub struct WildcardSelector;

impl SelectorExecutor for WildcardSelector {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, _root: &'a Value) -> SelectResult<'a> {
        Ok(inputs.into_iter().flat_map(children).collect())
    }
}

/// Recursive descent selector: each input followed by all of its descendants
pub struct RecursiveDescentSelector;

impl RecursiveDescentSelector {
    fn collect_recursive<'a>(value: &'a Value, results: &mut Vec<&'a Value>) {
        results.push(value);
        for child in children(value) {
            Self::collect_recursive(child, results);
        }
    }
}

impl SelectorExecutor for RecursiveDescentSelector {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, _root: &'a Value) -> SelectResult<'a> {
        let mut results = Vec::new();
        for value in inputs {
            Self::collect_recursive(value, &mut results);
        }
        Ok(results)
    }
}

/// Union selector: runs each member selector per input, keeping member order
pub struct UnionSelector {
    selectors: Vec<Box<dyn SelectorExecutor>>,
}

impl UnionSelector {
    pub fn new(selectors: Vec<Box<dyn SelectorExecutor>>) -> Self {
        Self { selectors }
    }
}

impl SelectorExecutor for UnionSelector {
    fn execute<'a>(&self, inputs: Vec<&'a Value>, root: &'a Value) -> SelectResult<'a> {
        let mut results = Vec::new();
        for value in inputs {
            for selector in &self.selectors {
                results.extend(selector.execute(vec![value], root)?);
            }
        }
        Ok(results)
    }
}

/// Create a selector executor for an AST selector
pub fn create_selector_executor(selector: &Selector) -> Box<dyn SelectorExecutor> {
    match selector {
        Selector::Child(key) => Box::new(PropertySelector::new(key.clone())),
        Selector::Index(index) => Box::new(IndexSelector::new(*index)),
        Selector::Slice(bounds) => Box::new(SliceSelector::new(*bounds)),
        Selector::Wildcard => Box::new(WildcardSelector),
        Selector::RecursiveDescent => Box::new(RecursiveDescentSelector),
        Selector::Union(selectors) => Box::new(UnionSelector::new(
            selectors.iter().map(create_selector_executor).collect(),
        )),
        Selector::Filter(filter) => Box::new(FilterExecutor::new(filter.clone())),
    }
}
