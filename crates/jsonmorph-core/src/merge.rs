//! Structural deep merge of JSON objects
//!
//! The overlay wins every conflict except object/object pairs, which merge
//! recursively, and array/array pairs, which go to an optional combinator.

use crate::options::{ArrayMergeMode, MergeOptions, ObjectMergeMode};
use serde_json::{Map, Value};

/// Resolves an array/array conflict: `(base, overlay) -> merged`
pub type ArrayCombinator = dyn Fn(Vec<Value>, Vec<Value>) -> Vec<Value>;

/// Merge `overlay` into `base`, right-biased
///
/// Keys only in `base` are kept, keys only in `overlay` are added. When both
/// sides hold an array, `combine` decides the result; without one the overlay
/// array is taken.
pub fn deep_merge(
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
    combine: Option<&ArrayCombinator>,
) -> Map<String, Value> {
    for (key, value) in overlay {
        let merged = match base.remove(&key) {
            Some(existing) => merge_values(existing, value, combine),
            None => value,
        };
        base.insert(key, merged);
    }
    base
}

fn merge_values(base: Value, overlay: Value, combine: Option<&ArrayCombinator>) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(deep_merge(base_map, overlay_map, combine))
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => match combine {
            Some(combine) => Value::Array(combine(base_items, overlay_items)),
            None => Value::Array(overlay_items),
        },
        (_, overlay) => overlay,
    }
}

fn keep_overlay(_base: Vec<Value>, overlay: Vec<Value>) -> Vec<Value> {
    overlay
}

fn keep_base(base: Vec<Value>, _overlay: Vec<Value>) -> Vec<Value> {
    base
}

/// Array rule used while merging a computed object with its target
///
/// Under `Overwrite` the computed object is the overlay, under `Preserve` it
/// is the base. With `Replace` arrays the overlay always wins. With `Append`
/// or `Prepend` the computed array already holds the target's items, so the
/// computed side wins whichever side it is on.
pub fn combinator_for(options: &MergeOptions) -> fn(Vec<Value>, Vec<Value>) -> Vec<Value> {
    match (options.array_merge_mode, options.object_merge_mode) {
        (ArrayMergeMode::Replace, _) => keep_overlay,
        (_, ObjectMergeMode::Preserve) => keep_base,
        (_, ObjectMergeMode::Overwrite | ObjectMergeMode::Replace) => keep_overlay,
    }
}
