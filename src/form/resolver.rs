//! Field resolution: from one schema property to widget, label and attributes
//!
//! Attributes are layered, each layer overriding the previous one:
//! 1. format defaults (`boolean` → checkbox, `uri` → url, ...)
//! 2. schema constraints renamed to HTML (`maxLength` → `maxlength`, ...)
//! 3. caller attributes from the field options
//! 4. computed attributes: `name`, `required`, `multiple`, `value`, `checked`
//! 5. range promotion of narrow numeric inputs

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::merge::merge_into;
use crate::config::FormSettings;
use crate::domain::{is_truthy, Attributes, FieldFormat, FieldOption, ResolvedField, WidgetRegistry};
use crate::error::FormResult;
use crate::schema::classify_format;

/// Schema keyword → HTML attribute, applied in this order
const CONSTRAINT_ATTRIBUTES: &[(&str, &str)] = &[
    ("minLength", "minlength"),
    ("maxLength", "maxlength"),
    ("maximum", "max"),
    ("minimum", "min"),
    // TODO: bounds are copied as is, an exclusive bound should move by one step
    ("exclusiveMinimum", "min"),
    ("exclusiveMaximum", "max"),
];

/// Numeric inputs spanning less than this become sliders
const RANGE_SPAN: f64 = 50.0;

const DEFAULT_WIDGET: &str = "input";

/// Widget and attributes a format starts from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatDefaults {
    pub widget: Option<String>,
    pub attributes: Attributes,
}

impl FormatDefaults {
    fn input(input_type: &str) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert("type".to_string(), json!(input_type));
        Self {
            widget: None,
            attributes,
        }
    }

    fn widget(widget: &str) -> Self {
        Self {
            widget: Some(widget.to_string()),
            attributes: Attributes::new(),
        }
    }
}

/// One property to resolve
#[derive(Debug, Clone, Copy)]
pub struct FieldRequest<'p> {
    pub name: &'p str,
    pub property: &'p Value,
    pub required: bool,
    pub option: &'p FieldOption,
    /// Prepended to `name`, e.g. `address.`
    pub name_prefix: &'p str,
    /// Titles of the enclosing sub-forms
    pub title_path: &'p [String],
}

impl<'p> FieldRequest<'p> {
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.name_prefix, self.name)
    }
}

pub struct FieldResolver<'r> {
    settings: &'r FormSettings,
    registry: &'r WidgetRegistry,
}

impl<'r> FieldResolver<'r> {
    pub fn new(settings: &'r FormSettings, registry: &'r WidgetRegistry) -> Self {
        Self { settings, registry }
    }

    /// Static format table, `None` for formats it does not know
    pub fn format_defaults(&self, tag: &str) -> Option<FormatDefaults> {
        let defaults = match tag {
            "boolean" => FormatDefaults::input("checkbox"),
            "date-time" => FormatDefaults::input("datetime-local"),
            "uri" => FormatDefaults::input("url"),
            "integer" => FormatDefaults::input("number"),
            "number" => {
                let mut defaults = FormatDefaults::input("number");
                defaults
                    .attributes
                    .insert("step".to_string(), json!(self.settings.default_number_step));
                defaults
            }
            "date" | "time" | "email" | "password" => FormatDefaults::input(tag),
            "string" => FormatDefaults::input("text"),
            "array" | "enum" | "object" => FormatDefaults::widget("select"),
            FieldFormat::FALLBACK_TAG => FormatDefaults::widget(&self.settings.default_widget),
            _ => return None,
        };
        Some(defaults)
    }

    pub fn resolve(&self, request: &FieldRequest<'_>) -> FormResult<ResolvedField> {
        let name = request.qualified_name();
        let property = request.property;
        let format = classify_format(property);

        let defaults = match self.defaults_for(&format, property) {
            Some(defaults) if format != FieldFormat::Fallback => defaults,
            defaults => {
                warn!(
                    "No usable format for field '{}' ({}), falling back to '{}'",
                    name, format, self.settings.default_widget
                );
                defaults.unwrap_or_else(|| FormatDefaults::widget(&self.settings.default_widget))
            }
        };

        let mut attributes = defaults.attributes;
        transfer_constraints(property, &mut attributes);
        merge_into(&mut attributes, &request.option.attrs);

        let widget = request
            .option
            .widget
            .clone()
            .or(defaults.widget)
            .unwrap_or_else(|| DEFAULT_WIDGET.to_string());
        let kind = self.registry.lookup(&widget, &name)?;

        self.apply_computed(&mut attributes, &name, request, &format);
        promote_range(&mut attributes);

        let label = self.compose_title(request);
        debug!("Resolved field '{}' as {} ({})", name, widget, format);

        Ok(ResolvedField {
            name,
            widget,
            kind,
            format: format.to_string(),
            label,
            attributes,
            choices: None,
        })
    }

    fn defaults_for(&self, format: &FieldFormat, property: &Value) -> Option<FormatDefaults> {
        if format.as_str() == "object" && property.get("properties").is_none() {
            return None;
        }
        self.format_defaults(format.as_str()).or_else(|| match format {
            // unknown format such as "uuid": fall back on the declared type
            FieldFormat::Format(_) => property
                .get("type")
                .and_then(Value::as_str)
                .filter(|type_name| *type_name != "object")
                .and_then(|type_name| self.format_defaults(type_name)),
            _ => None,
        })
    }

    fn apply_computed(
        &self,
        attributes: &mut Attributes,
        name: &str,
        request: &FieldRequest<'_>,
        format: &FieldFormat,
    ) {
        attributes.insert("name".to_string(), json!(name));

        if request.required {
            attributes.insert("required".to_string(), json!("required"));
        } else {
            attributes.shift_remove("required");
        }

        if format.is_array() {
            attributes.insert("multiple".to_string(), json!("multiple"));
        } else {
            attributes.shift_remove("multiple");
        }

        let value = attributes
            .get("value")
            .filter(|value| !value.is_null())
            .or_else(|| request.property.get("default").filter(|value| !value.is_null()))
            .cloned()
            .unwrap_or_else(|| json!(""));

        let is_checkbox = attributes.get("type").and_then(Value::as_str) == Some("checkbox");
        if is_checkbox && is_truthy(&value) {
            attributes.insert("checked".to_string(), json!("checked"));
        } else {
            attributes.shift_remove("checked");
        }
        // value always renders last
        attributes.shift_remove("value");
        attributes.insert("value".to_string(), value);
    }

    /// `* Prefix ― Sub-form ― Title`
    fn compose_title(&self, request: &FieldRequest<'_>) -> String {
        let title = request
            .option
            .title
            .clone()
            .or_else(|| request.property.get("title").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| request.name.to_string());

        let parts: Vec<&str> = std::iter::once(self.settings.title_prefix.as_str())
            .chain(request.title_path.iter().map(String::as_str))
            .chain(std::iter::once(title.as_str()))
            .filter(|part| !part.is_empty())
            .collect();
        let joined = parts.join(&format!(" {} ", self.settings.title_separator));

        if request.required && !self.settings.required_title_prefix.is_empty() {
            format!("{} {}", self.settings.required_title_prefix, joined)
        } else {
            joined
        }
    }
}

fn transfer_constraints(property: &Value, attributes: &mut Attributes) {
    for (keyword, attribute) in CONSTRAINT_ATTRIBUTES {
        // draft-04 boolean exclusive bounds carry no number to copy
        if let Some(bound) = property.get(*keyword).filter(|bound| bound.is_number()) {
            attributes.insert(attribute.to_string(), bound.clone());
        }
    }
}

fn promote_range(attributes: &mut Attributes) {
    let numeric = matches!(
        attributes.get("type").and_then(Value::as_str),
        Some("number") | Some("integer")
    );
    if !numeric {
        return;
    }
    let bound = |key: &str| attributes.get(key).and_then(Value::as_f64);
    if let (Some(min), Some(max)) = (bound("min"), bound("max")) {
        if max - min < RANGE_SPAN {
            attributes.insert("type".to_string(), json!("range"));
        }
    }
}
