//! Usage examples from the crate documentation, kept compiling and correct

use jsonmorph_core::{
    map, value, ArrayMergeMode, GeneratorNode, MapOptions, ObjectMergeMode, Padding, Schema, ValueNode,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn animals() -> Value {
    json!({
        "animals": [
            {"name": "Max", "species": "dog"},
            {"name": "Bella", "species": "cat"},
            {"name": "Tweety", "species": "bird"}
        ]
    })
}

#[test]
fn test_usage_basic() {
    let schema = Schema::from(json!({"cool": {"name": "$.animals[0].name"}}));
    let result = map(&animals(), &schema, None, MapOptions::default()).unwrap();
    assert_eq!(result, Some(json!({"cool": {"name": "Max"}})));
}

#[test]
fn test_usage_value() {
    assert_eq!(value(&animals(), "$.animals[1].species").unwrap(), Some(json!("cat")));
    assert_eq!(
        value(&animals(), "$.animals[*].name").unwrap(),
        Some(json!(["Max", "Bella", "Tweety"]))
    );
}

#[test]
fn test_usage_schema_shapes() {
    let schema = Schema::from(json!({
        "pets": ["$.animals[0].name", "$.animals[1].name"],
        "first": {"species": "$.animals[0].species", "zoo": true},
        "count": 3
    }));
    let result = map(&animals(), &schema, None, MapOptions::default()).unwrap();
    assert_eq!(
        result,
        Some(json!({
            "pets": ["Max", "Bella"],
            "first": {"species": "dog", "zoo": true},
            "count": 3
        }))
    );
}

#[test]
fn test_usage_uncollapse() {
    let collapsed = value(&animals(), "$.animals[0].name").unwrap();
    let listed = value(&animals(), "$.animals[0].name[]").unwrap();
    assert_eq!(collapsed, Some(json!("Max")));
    assert_eq!(listed, Some(json!(["Max"])));
}

#[test]
fn test_usage_value_node() {
    let full_name = ValueNode::new("$.plants[0].name")
        .with_default("$.animals[0].name")
        .with_transform(|value, _target, _context| {
            Ok(value
                .and_then(|v| v.as_str().map(|name| format!("{} Smith", name)))
                .map(Value::from))
        });
    let schema = Schema::object([("owner", Schema::from(full_name))]);

    let result = map(&animals(), &schema, None, MapOptions::default()).unwrap();
    assert_eq!(result, Some(json!({"owner": "Max Smith"})));
}

#[test]
fn test_usage_element() {
    let schema = Schema::from(json!({"pets": [{
        "@element": {"name": "$.animals[*].name", "kind": "pet"},
        "@length": 2
    }]}));

    let result = map(&animals(), &schema, None, MapOptions::default()).unwrap();
    assert_eq!(
        result,
        Some(json!({"pets": [{"name": "Max", "kind": "pet"}, {"name": "Bella", "kind": "pet"}]}))
    );
}

#[test]
fn test_usage_element_padding() {
    let schema = Schema::array([GeneratorNode::new()
        .padded("name", ValueNode::new("$.animals[0,1].name"), Padding::Wrap)
        .with_length(json!(4))]);

    let result = map(&animals(), &schema, None, MapOptions::default()).unwrap();
    assert_eq!(
        result,
        Some(json!([{"name": "Max"}, {"name": "Bella"}, {"name": "Max"}, {"name": "Bella"}]))
    );
}

#[test]
fn test_usage_escape() {
    let schema = Schema::from(json!({
        "query": "`$.animals[0].name",
        "`@element": "shown as is"
    }));
    let result = map(&animals(), &schema, None, MapOptions::default()).unwrap();
    assert_eq!(
        result,
        Some(json!({"query": "$.animals[0].name", "@element": "shown as is"}))
    );
}

#[test]
fn test_usage_merge_overwrite() {
    let schema = Schema::from(json!({"cool": {"name": "$.animals[0].name"}}));
    let target = json!({"cool": {"name": "Shaun"}, "cute": {"name": "Bella"}});

    let result = map(&animals(), &schema, Some(&target), MapOptions::default()).unwrap();
    assert_eq!(result, Some(json!({"cool": {"name": "Max"}, "cute": {"name": "Bella"}})));
}

#[test]
fn test_usage_merge_preserve() {
    let schema = Schema::from(json!({"cool": {"name": "$.animals[0].name", "species": "$.animals[0].species"}}));
    let target = json!({"cool": {"name": "Shaun"}});
    let options = MapOptions::new().object_merge_mode(ObjectMergeMode::Preserve);

    let result = map(&animals(), &schema, Some(&target), options).unwrap();
    assert_eq!(result, Some(json!({"cool": {"name": "Shaun", "species": "dog"}})));
}

#[test]
fn test_usage_merge_arrays() {
    let schema = Schema::from(json!({"names": [
        {"@element": {"name": "$.animals[*].name"}}
    ]}));
    let target = json!({"names": [{"name": "Shaun"}]});
    let options = MapOptions::new().array_merge_mode(ArrayMergeMode::Append);

    let result = map(&animals(), &schema, Some(&target), options).unwrap().unwrap();
    assert_eq!(
        result["names"],
        json!([{"name": "Shaun"}, {"name": "Max"}, {"name": "Bella"}, {"name": "Tweety"}])
    );
}
