//! Typed view over raw schema nodes

use serde_json::{Map, Value};

/// What a schema node leads to when looking for choices
///
/// Variants are checked in declaration order, so a node carrying both
/// `enum` and `items` is an [`SchemaNode::Enum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    /// Literal choices
    Enum(&'a [Value]),
    /// Array item schema, followed further
    Items(&'a Value),
    /// `$ref` pointer, followed further
    Reference(&'a str),
    /// Object schema exposing `properties`
    Schema(&'a Map<String, Value>),
    /// Anything else
    Leaf(&'a Value),
}

impl<'a> SchemaNode<'a> {
    pub fn classify(node: &'a Value) -> Self {
        if let Some(values) = node.get("enum").and_then(Value::as_array) {
            return SchemaNode::Enum(values);
        }
        if let Some(items) = node.get("items") {
            return SchemaNode::Items(items);
        }
        if let Some(pointer) = reference(node) {
            return SchemaNode::Reference(pointer);
        }
        match node.as_object() {
            Some(map) if map.get("properties").map_or(false, Value::is_object) => SchemaNode::Schema(map),
            _ => SchemaNode::Leaf(node),
        }
    }
}

/// `$ref` of a node, when it is a string
pub fn reference(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// `anyOf` candidates of a node
pub fn any_of(node: &Value) -> Option<&[Value]> {
    node.get("anyOf").and_then(Value::as_array).map(Vec::as_slice)
}

/// Names listed in the `required` array of a schema
pub fn required_names(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
