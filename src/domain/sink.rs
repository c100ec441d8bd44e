//! Ports through which resolved fields leave the crate

use serde_json::Value;

use super::{literal_to_string, Attributes, ChoiceOption, FormData, ResolvedField, WidgetKind};
use crate::error::FormResult;

/// A field materialized by a sink
pub trait FieldHandle {
    /// Name used when the form data is assembled
    fn name(&self) -> &str;

    /// Current value of the field, if any
    fn value(&self) -> Option<&Value>;

    fn add_option(&mut self, option: ChoiceOption);

    fn set_attributes(&mut self, attributes: &Attributes);

    fn set_errors(&mut self, errors: &[String]);
}

/// Receives resolved fields and turns them into something renderable
pub trait FieldSink {
    type Handle: FieldHandle;

    fn create_field(&mut self, kind: WidgetKind, field: &ResolvedField) -> FormResult<Self::Handle>;

    /// Create a field and add one option per choice, selecting the one
    /// matching the field value
    fn create_choice_field(
        &mut self,
        kind: WidgetKind,
        field: &ResolvedField,
        choices: &[Value],
    ) -> FormResult<Self::Handle> {
        let mut handle = self.create_field(kind, field)?;
        for choice in choices {
            handle.add_option(ChoiceOption::from_literal(choice, field.value()));
        }
        Ok(handle)
    }

    /// Append a field to the ordered collection
    fn add_field(&mut self, handle: Self::Handle);

    fn fields(&self) -> &[Self::Handle];

    /// Name → value mapping of every collected field
    ///
    /// Scalars become strings, lists (multiple selects) lists of strings.
    fn form_data(&self) -> FormData {
        self.fields()
            .iter()
            .map(|field| {
                let value = match field.value() {
                    Some(Value::Array(entries)) => Value::Array(
                        entries
                            .iter()
                            .map(|entry| Value::String(literal_to_string(entry)))
                            .collect(),
                    ),
                    Some(value) => Value::String(literal_to_string(value)),
                    None => Value::String(String::new()),
                };
                (field.name().to_string(), value)
            })
            .collect()
    }
}
