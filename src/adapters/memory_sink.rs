use serde::Serialize;
use serde_json::Value;

use crate::domain::{Attributes, ChoiceOption, FieldHandle, FieldSink, ResolvedField, WidgetKind};
use crate::error::FormResult;

/// Field kept in memory exactly as the assembler described it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedField {
    pub kind: WidgetKind,
    pub field: ResolvedField,
    pub options: Vec<ChoiceOption>,
    pub errors: Vec<String>,
}

impl RecordedField {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.field.attributes.get(name)
    }

    pub fn selected(&self) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.selected)
    }
}

impl FieldHandle for RecordedField {
    fn name(&self) -> &str {
        &self.field.name
    }

    fn value(&self) -> Option<&Value> {
        self.field.value()
    }

    fn add_option(&mut self, option: ChoiceOption) {
        self.options.push(option);
    }

    fn set_attributes(&mut self, attributes: &Attributes) {
        for (name, value) in attributes {
            self.field.attributes.insert(name.clone(), value.clone());
        }
    }

    fn set_errors(&mut self, errors: &[String]) {
        self.errors = errors.to_vec();
    }
}

/// Sink that only records, for inspection and serialization
#[derive(Debug, Default)]
pub struct RecordingSink {
    fields: Vec<RecordedField>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RecordedField> {
        self.fields.iter().find(|field| field.field.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.field.name.as_str()).collect()
    }

    pub fn into_fields(self) -> Vec<RecordedField> {
        self.fields
    }
}

impl FieldSink for RecordingSink {
    type Handle = RecordedField;

    fn create_field(&mut self, kind: WidgetKind, field: &ResolvedField) -> FormResult<RecordedField> {
        Ok(RecordedField {
            kind,
            field: field.clone(),
            options: Vec::new(),
            errors: Vec::new(),
        })
    }

    fn add_field(&mut self, handle: RecordedField) {
        self.fields.push(handle);
    }

    fn fields(&self) -> &[RecordedField] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolved(name: &str, value: Value) -> ResolvedField {
        ResolvedField {
            name: name.to_string(),
            widget: "input".to_string(),
            kind: WidgetKind::Input,
            format: "string".to_string(),
            label: name.to_string(),
            attributes: json!({"name": name, "value": value}).as_object().cloned().unwrap_or_default(),
            choices: None,
        }
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let mut sink = RecordingSink::new();
        for name in ["b", "a", "c"] {
            let handle = sink.create_field(WidgetKind::Input, &resolved(name, json!(""))).unwrap();
            sink.add_field(handle);
        }
        assert_eq!(sink.names(), ["b", "a", "c"]);
    }

    #[test]
    fn test_form_data_stringifies_values() {
        let mut sink = RecordingSink::new();
        let handle = sink.create_field(WidgetKind::Input, &resolved("age", json!(42))).unwrap();
        sink.add_field(handle);
        let handle = sink.create_field(WidgetKind::Input, &resolved("name", json!("Ada"))).unwrap();
        sink.add_field(handle);

        let data = sink.form_data();
        assert_eq!(data["age"], "42");
        assert_eq!(data["name"], "Ada");
    }

    #[test]
    fn test_choice_field_marks_current_value() {
        let mut sink = RecordingSink::new();
        let field = resolved("size", json!("m"));
        let handle = sink
            .create_choice_field(WidgetKind::Select, &field, &[json!("s"), json!("m"), json!("l")])
            .unwrap();

        assert_eq!(handle.options.len(), 3);
        assert_eq!(handle.selected().map(|o| o.value.as_str()), Some("m"));
    }

    #[test]
    fn test_set_attributes_overrides() {
        let mut sink = RecordingSink::new();
        let mut handle = sink.create_field(WidgetKind::Input, &resolved("x", json!("1"))).unwrap();
        let mut extra = Attributes::new();
        extra.insert("value".to_string(), json!("2"));
        extra.insert("placeholder".to_string(), json!("x"));
        handle.set_attributes(&extra);

        assert_eq!(handle.value(), Some(&json!("2")));
        assert_eq!(handle.attribute("placeholder"), Some(&json!("x")));
    }
}
