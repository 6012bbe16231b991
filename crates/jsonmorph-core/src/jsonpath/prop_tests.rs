//! Property-based tests for JSONPath functionality
//!
//! These tests verify that JSONPath operations are safe, deterministic,
//! and agree with direct structural access.

use super::{select, JSONPath};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating simple JSON values with controlled depth
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::hash_map("[a-z]{1,3}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for generating JSONPath expressions
fn jsonpath_strategy() -> impl Strategy<Value = String> {
    let name = "[a-z]{1,3}";
    prop_oneof![
        Just("$".to_string()),
        name.prop_map(|s| format!("$.{}", s)),
        (name, name).prop_map(|(a, b)| format!("$.{}.{}", a, b)),
        (name, -5i64..5).prop_map(|(prop, idx)| format!("$.{}[{}]", prop, idx)),
        name.prop_map(|s| format!("$.{}[*]", s)),
        name.prop_map(|s| format!("$..{}", s)),
        (name, 0i64..4, 0i64..6).prop_map(|(p, a, b)| format!("$.{}[{}:{}]", p, a, b)),
        name.prop_map(|s| format!("$.{}[?(@.{})]", s, s)),
    ]
}

proptest! {
    /// Parsing arbitrary input never panics
    #[test]
    fn prop_parse_never_panics(path in "\\PC{0,30}") {
        let _ = JSONPath::parse(&path);
    }

    /// Generated expressions always parse and execute without error
    #[test]
    fn prop_generated_paths_execute(path in jsonpath_strategy(), json in json_value_strategy()) {
        let jsonpath = JSONPath::parse(&path).unwrap();
        prop_assert!(jsonpath.execute(&json).is_ok());
    }

    /// Execution is deterministic
    #[test]
    fn prop_execution_deterministic(path in jsonpath_strategy(), json in json_value_strategy()) {
        let jsonpath = JSONPath::parse(&path).unwrap();
        prop_assert_eq!(jsonpath.execute(&json).unwrap(), jsonpath.execute(&json).unwrap());
    }

    /// Root path returns the entire document
    #[test]
    fn prop_root_path_returns_whole_document(json in json_value_strategy()) {
        let values = select("$", &json).unwrap();
        prop_assert_eq!(values, vec![&json]);
    }

    /// A single member access agrees with direct lookup
    #[test]
    fn prop_member_access_matches_lookup(key in "[a-z]{1,3}", json in json_value_strategy()) {
        let values = select(&format!("$.{}", key), &json).unwrap();
        let expected: Vec<&Value> = json.as_object().and_then(|m| m.get(&key)).into_iter().collect();
        prop_assert_eq!(values, expected);
    }

    /// Wildcard over an array yields every item in order
    #[test]
    fn prop_wildcard_yields_all_items(items in proptest::collection::vec(json_value_strategy(), 0..6)) {
        let doc = serde_json::json!({ "xs": items.clone() });
        let values = select("$.xs[*]", &doc).unwrap();
        prop_assert_eq!(values.into_iter().cloned().collect::<Vec<_>>(), items);
    }

    /// Slices with any bounds and step stay inside the array and keep direction
    #[test]
    fn prop_slice_bounds_never_escape_array(
        len in 0usize..8,
        start in prop::option::of(any::<i64>()),
        end in prop::option::of(any::<i64>()),
        step in any::<i64>().prop_filter("step must be non-zero", |s| *s != 0),
    ) {
        let doc = serde_json::json!({ "xs": (0..len).collect::<Vec<_>>() });
        let bound = |b: Option<i64>| b.map(|n| n.to_string()).unwrap_or_default();
        let path = format!("$.xs[{}:{}:{}]", bound(start), bound(end), step);

        let values = select(&path, &doc).unwrap();
        let indices: Vec<u64> = values.iter().filter_map(|v| v.as_u64()).collect();

        prop_assert_eq!(indices.len(), values.len());
        prop_assert!(indices.len() <= len);
        prop_assert!(indices.iter().all(|&i| (i as usize) < len));
        if step > 0 {
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        } else {
            prop_assert!(indices.windows(2).all(|w| w[0] > w[1]));
        }
    }
}
