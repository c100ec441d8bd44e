//! Walks a schema document: pointers, unions, properties and enums
//!
//! Every pointer is resolved against the root document the navigator was
//! created with, including pointers met while walking a nested sub-schema.

use serde_json::Value;

use super::node::{any_of, required_names, SchemaNode};
use crate::domain::FieldFormat;
use crate::error::{FormError, FormResult};

/// A property of a schema after its `$ref`/`anyOf` reduction
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry<'s> {
    pub name: &'s str,
    pub property: Value,
    /// Listed in the `required` array of the schema declaring it
    pub required: bool,
    /// Pointer followed to obtain the property, if any
    pub pointer: Option<String>,
}

/// Where the choice chase of a node ends
#[derive(Debug, Clone, PartialEq)]
pub enum EnumTarget<'n> {
    /// Literal choices, in declaration order
    Choices(&'n [Value]),
    /// Nested object schema to be flattened as a sub-form
    SubSchema {
        schema: &'n Value,
        /// Last pointer followed to reach the schema
        pointer: Option<String>,
    },
    /// Neither choices nor a sub-schema
    Leaf(&'n Value),
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaNavigator<'a> {
    root: &'a Value,
}

impl<'a> SchemaNavigator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Lazily yield every property of `schema` in declaration order
    pub fn properties<'s>(
        &'s self,
        schema: &'s Value,
    ) -> impl Iterator<Item = FormResult<PropertyEntry<'s>>> + 's
    where
        'a: 's,
    {
        let required = required_names(schema);
        schema
            .get("properties")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|properties| properties.iter())
            .map(move |(name, raw)| {
                let (property, pointer) = self.reduce(raw)?;
                Ok(PropertyEntry {
                    name: name.as_str(),
                    property,
                    required: required.contains(&name.as_str()),
                    pointer,
                })
            })
    }

    /// Follow a `#/a/b` pointer from the root, or a relative `a/b` pointer
    /// from `base`
    pub fn resolve_pointer<'n>(&self, pointer: &str, base: Option<&'n Value>) -> FormResult<&'n Value>
    where
        'a: 'n,
    {
        let mut segments = pointer.split('/').peekable();
        let mut node: &'n Value = if segments.peek() == Some(&"#") {
            segments.next();
            self.root
        } else {
            base.ok_or_else(|| FormError::pointer(pointer, "relative pointer without a containing node"))?
        };

        let mut walked = 0;
        for segment in segments {
            let key = decode_segment(segment);
            node = child(node, &key)
                .ok_or_else(|| FormError::pointer(pointer, format!("segment '{}' not found", key)))?;
            walked += 1;
        }

        if walked == 0 {
            return Err(FormError::pointer(pointer, "empty path"));
        }
        Ok(node)
    }

    /// Resolve `schema.properties[name]`
    pub fn resolve_property(&self, name: &str, schema: &Value) -> FormResult<Value> {
        let raw = schema
            .get("properties")
            .and_then(|properties| properties.get(name))
            .ok_or_else(|| FormError::MissingProperty(name.to_string()))?;
        self.reduce(raw).map(|(property, _)| property)
    }

    /// Apply a single `$ref` replacement and a single `anyOf` reduction
    fn reduce(&self, raw: &Value) -> FormResult<(Value, Option<String>)> {
        let mut property = raw.as_object().cloned().unwrap_or_default();
        property.shift_remove("anyOf");

        let pointer = match property.shift_remove("$ref") {
            Some(Value::String(pointer)) => Some(pointer),
            Some(other) => {
                return Err(FormError::InvalidSchema(format!(
                    "$ref must be a string, got {}",
                    other
                )))
            }
            None => None,
        };

        if let Some(pointer) = &pointer {
            property = self
                .resolve_pointer(pointer, None)?
                .as_object()
                .cloned()
                .ok_or_else(|| FormError::pointer(pointer, "target is not an object"))?;
        }

        if let Some(candidate) = any_of(raw).and_then(reduce_any_of) {
            if let Some(fragment) = candidate.as_object() {
                for (key, value) in fragment {
                    property.insert(key.clone(), value.clone());
                }
            }
        }

        Ok((Value::Object(property), pointer))
    }

    /// Chase `enum`, `items` and `$ref` until choices or a terminal node
    pub fn resolve_enum<'n>(&self, node: &'n Value) -> FormResult<EnumTarget<'n>>
    where
        'a: 'n,
    {
        let mut visited: Vec<String> = Vec::new();
        let mut current = node;
        let mut last_pointer = None;

        loop {
            match SchemaNode::classify(current) {
                SchemaNode::Enum(values) => return Ok(EnumTarget::Choices(values)),
                SchemaNode::Items(items) => current = items,
                SchemaNode::Reference(pointer) => {
                    if visited.iter().any(|seen| seen == pointer) {
                        return Err(FormError::CyclicReference(pointer.to_string()));
                    }
                    visited.push(pointer.to_string());
                    current = self.resolve_pointer(pointer, Some(current))?;
                    last_pointer = Some(pointer.to_string());
                }
                SchemaNode::Schema(_) => {
                    return Ok(EnumTarget::SubSchema {
                        schema: current,
                        pointer: last_pointer,
                    })
                }
                SchemaNode::Leaf(leaf) => return Ok(EnumTarget::Leaf(leaf)),
            }
        }
    }

    pub fn is_sub_schema(&self, node: &Value) -> FormResult<bool> {
        Ok(matches!(self.resolve_enum(node)?, EnumTarget::SubSchema { .. }))
    }
}

/// Pick the last candidate declaring both `type` and `format`, the first
/// candidate otherwise
pub fn reduce_any_of(candidates: &[Value]) -> Option<&Value> {
    let (first, rest) = candidates.split_first()?;
    Some(rest.iter().fold(first, |selected, candidate| {
        if candidate.get("format").is_some() && candidate.get("type").is_some() {
            candidate
        } else {
            selected
        }
    }))
}

/// Semantic format of a property: enum, then format, then type
pub fn classify_format(property: &Value) -> FieldFormat {
    if property.get("enum").and_then(Value::as_array).is_some() {
        return FieldFormat::Enum;
    }
    if let Some(format) = property.get("format").and_then(Value::as_str) {
        return FieldFormat::Format(format.to_string());
    }
    match property.get("type") {
        Some(Value::String(type_name)) => FieldFormat::Type(type_name.clone()),
        // ["string", "null"] style unions
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|type_name| *type_name != "null")
            .map(|type_name| FieldFormat::Type(type_name.to_string()))
            .unwrap_or(FieldFormat::Fallback),
        _ => FieldFormat::Fallback,
    }
}

fn child<'n>(node: &'n Value, key: &str) -> Option<&'n Value> {
    match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

fn decode_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
