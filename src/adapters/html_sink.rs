//! HTML field sink
//!
//! Renders fields as `<y-input>`, `<y-select>` and `<y-textarea>` custom
//! elements wrapped in a `<y-form>`, the label as text content, choices as
//! slotted `<option>` children and errors as a slotted list.

use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

use crate::config::RenderSettings;
use crate::domain::{
    literal_to_string, Attributes, ChoiceOption, FieldHandle, FieldSink, ResolvedField, WidgetKind,
};
use crate::error::FormResult;

const FORM_TEMPLATE: &str = r#"<{{ prefix }}form{% if form_id %} id="{{ form_id }}"{% endif %}{% if novalidate %} novalidate{% endif %}>
{% for field in fields %}{{ field | safe }}
{% endfor %}</{{ prefix }}form>"#;

const INPUT_TEMPLATE: &str = r#"<{{ tag }}{% for name, value in attributes %} {{ name }}="{{ value }}"{% endfor %}>{{ label }}{% if errors %}
  <ul slot="errors" class="errors">{% for error in errors %}<li>{{ error }}</li>{% endfor %}</ul>{% endif %}</{{ tag }}>"#;

const SELECT_TEMPLATE: &str = r#"<{{ tag }}{% for name, value in attributes %} {{ name }}="{{ value }}"{% endfor %}>{{ label }}{% for option in options %}
  <option slot="options" value="{{ option.value }}"{% if option.selected %} selected="selected"{% endif %}>{{ option.label }}</option>{% endfor %}{% if errors %}
  <ul slot="errors" class="errors">{% for error in errors %}<li>{{ error }}</li>{% endfor %}</ul>{% endif %}
</{{ tag }}>"#;

/// Field collected by [`HtmlSink`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlField {
    pub kind: WidgetKind,
    pub name: String,
    pub label: String,
    pub attributes: Attributes,
    pub options: Vec<ChoiceOption>,
    pub errors: Vec<String>,
}

impl FieldHandle for HtmlField {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Option<&Value> {
        self.attributes.get("value")
    }

    fn add_option(&mut self, option: ChoiceOption) {
        self.options.push(option);
    }

    fn set_attributes(&mut self, attributes: &Attributes) {
        for (name, value) in attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
    }

    fn set_errors(&mut self, errors: &[String]) {
        self.errors = errors.to_vec();
    }
}

pub struct HtmlSink {
    tera: Tera,
    settings: RenderSettings,
    fields: Vec<HtmlField>,
}

impl HtmlSink {
    pub fn new(settings: RenderSettings) -> FormResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("form.html", FORM_TEMPLATE),
            ("input.html", INPUT_TEMPLATE),
            ("textarea.html", INPUT_TEMPLATE),
            ("select.html", SELECT_TEMPLATE),
        ])?;

        Ok(Self {
            tera,
            settings,
            fields: Vec::new(),
        })
    }

    /// Markup of a single field
    pub fn render_field(&self, field: &HtmlField) -> FormResult<String> {
        let mut context = Context::new();
        context.insert("tag", &format!("{}{}", self.settings.element_prefix, field.kind.as_str()));
        context.insert("label", &field.label);
        context.insert("attributes", &string_attributes(&field.attributes));
        context.insert("options", &field.options);
        context.insert("errors", &field.errors);

        let template = format!("{}.html", field.kind.as_str());
        Ok(self.tera.render(&template, &context)?)
    }

    /// Markup of the whole form, fields in insertion order
    pub fn render(&self) -> FormResult<String> {
        let fields = self
            .fields
            .iter()
            .map(|field| self.render_field(field))
            .collect::<FormResult<Vec<_>>>()?;

        let mut context = Context::new();
        context.insert("prefix", &self.settings.element_prefix);
        context.insert("form_id", &self.settings.form_id);
        context.insert("novalidate", &self.settings.novalidate);
        context.insert("fields", &fields);
        Ok(self.tera.render("form.html", &context)?)
    }
}

impl FieldSink for HtmlSink {
    type Handle = HtmlField;

    fn create_field(&mut self, kind: WidgetKind, field: &ResolvedField) -> FormResult<HtmlField> {
        Ok(HtmlField {
            kind,
            name: field.name.clone(),
            label: field.label.clone(),
            attributes: field.attributes.clone(),
            options: Vec::new(),
            errors: Vec::new(),
        })
    }

    fn add_field(&mut self, handle: HtmlField) {
        self.fields.push(handle);
    }

    fn fields(&self) -> &[HtmlField] {
        &self.fields
    }
}

/// Attribute values as they appear in markup
fn string_attributes(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(literal_to_string(value))))
        .collect()
}
