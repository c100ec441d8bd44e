use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

pub mod sink;
pub mod widget;

pub use sink::{FieldHandle, FieldSink};
pub use widget::{WidgetKind, WidgetRegistry};

/// HTML attributes of a field, in insertion order
pub type Attributes = Map<String, Value>;

/// Per-field customization keyed by field name
pub type FieldOptions = HashMap<String, FieldOption>;

/// Current values keyed by field name
pub type FormData = Map<String, Value>;

/// Error messages keyed by field name
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Caller-supplied override for a single field
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Widget name looked up in the widget registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Label replacing the property title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw attributes merged over the format defaults
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Attributes,
}

impl FieldOption {
    pub fn with_widget(widget: &str) -> Self {
        Self {
            widget: Some(widget.to_string()),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }
}

/// Semantic format of a property, in classification order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldFormat {
    /// The property lists its allowed values
    Enum,
    /// Taken from the `format` keyword
    Format(String),
    /// Taken from the `type` keyword
    Type(String),
    /// Nothing to go on, rendered as free text
    Fallback,
}

impl FieldFormat {
    pub const FALLBACK_TAG: &'static str = "textarea";

    pub fn as_str(&self) -> &str {
        match self {
            FieldFormat::Enum => "enum",
            FieldFormat::Format(tag) | FieldFormat::Type(tag) => tag,
            FieldFormat::Fallback => Self::FALLBACK_TAG,
        }
    }

    pub fn is_array(&self) -> bool {
        self.as_str() == "array"
    }
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a choice field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl ChoiceOption {
    /// Build an option from a literal, selected when it matches `current`
    /// or, for multiple selects, any entry of a `current` list
    pub fn from_literal(choice: &Value, current: Option<&Value>) -> Self {
        let value = literal_to_string(choice);
        let selected = match current {
            Some(Value::Array(entries)) => entries.iter().any(|entry| literal_to_string(entry) == value),
            Some(current) => literal_to_string(current) == value,
            None => false,
        };
        Self {
            label: value.clone(),
            value,
            selected,
        }
    }
}

/// Descriptor handed to a field sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    /// Fully qualified name (prefix included)
    pub name: String,
    /// Widget name as resolved from options and defaults
    pub widget: String,
    /// Registered kind the widget name maps to
    pub kind: WidgetKind,
    pub format: String,
    /// Label text, required marker and title prefixes included
    pub label: String,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
}

impl ResolvedField {
    pub fn value(&self) -> Option<&Value> {
        self.attributes.get("value")
    }

    pub fn is_required(&self) -> bool {
        self.attributes.contains_key("required")
    }
}

/// Render a literal the way it ends up in an HTML attribute
pub fn literal_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Truthiness of a literal, as used for checkbox state
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
