//! Structural classification of raw JSON into [`Schema`] nodes
//!
//! Classification inspects shape only and never fails. A generator shape is
//! recognised only as an array entry; anywhere else it is an ordinary object.

use super::directive;
use super::types::{ArrayEntry, GeneratorField, GeneratorNode, Padding, PathRef, Schema, ValueNode};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Schema::Array(items.into_iter().map(classify_entry).collect()),
            Value::Object(map) => classify_object(map),
            Value::String(s) => match PathRef::parse(&s) {
                Some(path) => Schema::Path(path),
                None => Schema::Literal(Value::String(s)),
            },
            other => Schema::Literal(other),
        }
    }
}

impl From<&Value> for Schema {
    fn from(value: &Value) -> Self {
        Schema::from(value.clone())
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Schema::from)
    }
}

fn classify_object(mut map: Map<String, Value>) -> Schema {
    if let Some(Value::String(path)) = map.get(directive::PATH) {
        let path = path.clone();
        let default = map
            .remove(directive::DEFAULT)
            .map(|value| Box::new(Schema::from(value)));
        return Schema::Value(ValueNode {
            path,
            default,
            transform: None,
        });
    }

    Schema::Object(map.into_iter().map(|(key, value)| (key, Schema::from(value))).collect())
}

fn classify_entry(value: Value) -> ArrayEntry {
    let mut map = match value {
        Value::Object(map) => map,
        other => return ArrayEntry::Item(Schema::from(other)),
    };

    match map.remove(directive::ELEMENT) {
        Some(Value::Object(element)) => {
            let length = map
                .remove(directive::LENGTH)
                .map(|value| Box::new(Schema::from(value)));
            let fields = element
                .into_iter()
                .map(|(name, value)| {
                    let padding = padding_of(&name, &value);
                    GeneratorField {
                        name,
                        schema: Schema::from(value),
                        padding,
                    }
                })
                .collect();
            ArrayEntry::Generator(GeneratorNode { fields, length })
        }
        Some(other) => {
            map.insert(directive::ELEMENT.to_string(), other);
            ArrayEntry::Item(classify_object(map))
        }
        None => ArrayEntry::Item(classify_object(map)),
    }
}

/// `@padding` of a value node inside `@element`; unknown names are ignored
fn padding_of(field: &str, value: &Value) -> Option<Padding> {
    let map = value.as_object()?;
    if !matches!(map.get(directive::PATH), Some(Value::String(_))) {
        return None;
    }
    match map.get(directive::PADDING)? {
        Value::String(name) => match name.parse() {
            Ok(padding) => Some(padding),
            Err(_) => {
                log::warn!("Ignoring unknown @padding '{}' on generator field '{}'", name, field);
                None
            }
        },
        other => {
            log::warn!("Ignoring non-string @padding {} on generator field '{}'", other, field);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_are_literals() {
        assert!(matches!(Schema::from(json!(1)), Schema::Literal(_)));
        assert!(matches!(Schema::from(json!(null)), Schema::Literal(Value::Null)));
        assert!(matches!(Schema::from(json!("const")), Schema::Literal(_)));
        assert!(matches!(Schema::from(json!("`$.a")), Schema::Literal(_)));
    }

    #[test]
    fn test_path_strings() {
        match Schema::from(json!("$.src.x")) {
            Schema::Path(path) => assert_eq!(path.expression(), "$.src.x"),
            other => panic!("Expected path, got {:?}", other),
        }
    }

    #[test]
    fn test_value_node() {
        let schema = Schema::from(json!({"@path": "$.src.a", "@default": "$.src.b"}));
        match schema {
            Schema::Value(node) => {
                assert_eq!(node.path, "$.src.a");
                assert!(matches!(node.default.as_deref(), Some(Schema::Path(_))));
                assert!(node.transform.is_none());
            }
            other => panic!("Expected value node, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_path_is_plain_object() {
        let schema = Schema::from(json!({"@path": 3}));
        assert!(matches!(schema, Schema::Object(ref fields) if fields.len() == 1));
    }

    #[test]
    fn test_generator_inside_array() {
        let schema = Schema::from(json!([{
            "@element": {
                "name": "$.animals[*].name",
                "count": {"@path": "$.counts", "@padding": "wrap"},
                "plain": {"nested": 1, "@padding": "wrap"}
            },
            "@length": 4
        }]));
        let Schema::Array(entries) = schema else { panic!("Expected array") };
        let ArrayEntry::Generator(generator) = &entries[0] else { panic!("Expected generator") };

        assert_eq!(generator.fields.len(), 3);
        let count = generator.fields.iter().find(|f| f.name == "count").unwrap();
        assert_eq!(count.padding, Some(Padding::Wrap));
        let plain = generator.fields.iter().find(|f| f.name == "plain").unwrap();
        assert_eq!(plain.padding, None);
        assert!(matches!(generator.length.as_deref(), Some(Schema::Literal(_))));
    }

    #[test]
    fn test_generator_outside_array_is_object() {
        let schema = Schema::from(json!({"@element": {"a": 1}}));
        match schema {
            Schema::Object(fields) => assert_eq!(fields[0].0, "@element"),
            other => panic!("Expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_element_must_be_object() {
        let schema = Schema::from(json!([{"@element": "x"}]));
        let Schema::Array(entries) = schema else { panic!("Expected array") };
        assert!(matches!(entries[0], ArrayEntry::Item(Schema::Object(_))));
    }

    #[test]
    fn test_unknown_padding_is_ignored() {
        let schema = Schema::from(json!([{"@element": {"a": {"@path": "$.a", "@padding": "mirror"}}}]));
        let Schema::Array(entries) = schema else { panic!("Expected array") };
        let ArrayEntry::Generator(generator) = &entries[0] else { panic!("Expected generator") };
        assert_eq!(generator.fields[0].padding, None);
    }

    #[test]
    fn test_deserialize_schema() {
        let schema: Schema = serde_json::from_str(r#"{"cool": {"name": "$.animals[0].name"}}"#).unwrap();
        assert_eq!(schema.kind(), "object");
    }
}
