//! Fuzzing target for schema classification and mapping
//!
//! The input is read as `schema` JSON text and mapped against a fixed source
//! and target under every merge mode combination.

#![no_main]

use jsonmorph_core::{map, ArrayMergeMode, MapOptions, ObjectMergeMode, Schema};
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let schema = Schema::from(raw);

    let source = json!({"src": {"labels": ["dog", "cat", "bird"], "counts": [100, 200], "x": 1}});
    let target = json!({"dst": {"items": ["sheep"], "kept": true}, "items": [{"a": 1}]});

    for object_mode in [ObjectMergeMode::Overwrite, ObjectMergeMode::Preserve, ObjectMergeMode::Replace] {
        for array_mode in [ArrayMergeMode::Replace, ArrayMergeMode::Append, ArrayMergeMode::Prepend] {
            let options = MapOptions::new().object_merge_mode(object_mode).array_merge_mode(array_mode);
            let _ = map(&source, &schema, Some(&target), options);
        }
    }
});
