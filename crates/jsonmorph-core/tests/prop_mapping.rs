//! Property-based tests for the mapping engine
//!
//! These tests check invariants that hold for any literal schema, any target
//! and any padded sequence.

use jsonmorph_core::schema::escape;
use jsonmorph_core::{map, value, ArrayMergeMode, GeneratorNode, MapOptions, ObjectMergeMode, Padding, Schema, ValueNode};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Strategy for strings that never look like paths or escapes
fn plain_string_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _]{0,12}"
}

/// Strategy for literal JSON values without reserved strings or directive keys
fn literal_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        plain_string_strategy().prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Strategy for arbitrary strings, including ones that collide with the syntax
fn any_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        plain_string_strategy(),
        plain_string_strategy().prop_map(|s| format!("$.{}", s)),
        plain_string_strategy().prop_map(|s| format!("`{}", s)),
        plain_string_strategy().prop_map(|s| format!("@{}", s)),
    ]
}

fn padding_strategy() -> impl Strategy<Value = Padding> {
    prop_oneof![
        Just(Padding::Empty),
        Just(Padding::Edge),
        Just(Padding::Wrap),
        Just(Padding::Reflect),
    ]
}

proptest! {
    #[test]
    fn prop_literal_schema_is_identity(literal in literal_strategy(), source in literal_strategy()) {
        let result = map(&source, &Schema::from(literal.clone()), None, MapOptions::default()).unwrap();
        prop_assert_eq!(result, Some(literal));
    }

    #[test]
    fn prop_escaped_string_maps_to_itself(text in any_string_strategy()) {
        let schema = Schema::from(Value::String(escape(&text)));
        let result = map(&json!({"a": 1}), &schema, None, MapOptions::default()).unwrap();
        prop_assert_eq!(result, Some(Value::String(text)));
    }

    #[test]
    fn prop_escaped_key_maps_to_itself(key in any_string_strategy(), payload in literal_strategy()) {
        let schema = Schema::object([(escape(&key), Schema::Literal(payload.clone()))]);
        let result = map(&json!({}), &schema, None, MapOptions::default()).unwrap();

        let mut expected = Map::new();
        expected.insert(key, payload);
        prop_assert_eq!(result, Some(Value::Object(expected)));
    }

    #[test]
    fn prop_replace_ignores_target(
        literal in prop::collection::btree_map("[a-z]{1,6}", literal_strategy(), 0..4),
        target in literal_strategy(),
    ) {
        let literal = Value::Object(literal.into_iter().collect());
        let schema = Schema::from(literal.clone());
        let options = MapOptions::new()
            .object_merge_mode(ObjectMergeMode::Replace)
            .array_merge_mode(ArrayMergeMode::Replace);

        let once = map(&json!({}), &schema, Some(&target), options).unwrap();
        prop_assert_eq!(once.clone(), Some(literal));

        let twice = map(&json!({}), &schema, once.as_ref(), options).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_preserve_keeps_target_values(
        target in prop::collection::btree_map("[a-z]{1,6}", plain_string_strategy(), 0..6),
        computed in prop::collection::btree_map("[a-z]{1,6}", plain_string_strategy(), 0..6),
    ) {
        let target_value = Value::Object(target.clone().into_iter().map(|(k, v)| (k, Value::String(v))).collect());
        let schema = Schema::from(Value::Object(
            computed.clone().into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
        ));
        let options = MapOptions::new().object_merge_mode(ObjectMergeMode::Preserve);

        let result = map(&json!({}), &schema, Some(&target_value), options).unwrap().unwrap();
        for (key, original) in &target {
            prop_assert_eq!(&result[key.as_str()], &Value::String(original.clone()));
        }
        for key in computed.keys() {
            prop_assert!(result.get(key.as_str()).is_some());
        }
    }

    #[test]
    fn prop_generator_length_is_longest_field(
        a in prop::collection::vec(any::<i32>(), 1..8),
        b in prop::collection::vec(any::<i32>(), 1..8),
        padding in padding_strategy(),
    ) {
        let source = json!({"a": &a, "b": &b});
        let schema = Schema::array([GeneratorNode::new()
            .field("a", Schema::from("$.a[]"))
            .padded("b", ValueNode::new("$.b[]"), padding)]);

        let result = map(&source, &schema, None, MapOptions::default()).unwrap().unwrap();
        let items = result.as_array().unwrap();
        prop_assert_eq!(items.len(), a.len().max(b.len()));

        let b_present = items.iter().filter(|item| item.get("b").is_some()).count();
        match padding {
            Padding::Empty => prop_assert_eq!(b_present, b.len()),
            _ => prop_assert_eq!(b_present, items.len()),
        }
    }

    #[test]
    fn prop_index_lookup_matches_direct_access(items in prop::collection::vec(any::<i32>(), 0..10), index in 0usize..12) {
        let source = json!({"items": &items});
        let result = value(&source, format!("$.items[{}]", index)).unwrap();
        prop_assert_eq!(result, items.get(index).map(|n| json!(n)));
    }
}
