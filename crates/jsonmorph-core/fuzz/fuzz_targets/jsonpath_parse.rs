//! Fuzzing target for JSONPath parsing and execution
//!
//! Any input must either parse or return an error, and a parsed path must
//! execute against any document without panicking.

#![no_main]

use jsonmorph_core::jsonpath::JSONPath;
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let path_str = String::from_utf8_lossy(data);

    if let Ok(jsonpath) = JSONPath::parse(&path_str) {
        let docs = [
            json!(null),
            json!([1, 2, 3]),
            json!({"a": {"b": [1, {"c": "x"}]}, "n": -1}),
            json!([[[[[]]]]]),
        ];

        for doc in &docs {
            let _ = jsonpath.execute(doc);
        }
    }
});
