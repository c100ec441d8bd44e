//! Form assembly: walks a schema and feeds a field sink
//!
//! Errors are not caught here. The first property that fails to resolve
//! aborts the whole build and the error is returned to the caller.

use serde_json::Value;
use tracing::{debug, info};

use super::merge::merge_into;
use super::resolver::{FieldRequest, FieldResolver};
use crate::config::FormSettings;
use crate::domain::{
    Attributes, FieldErrors, FieldHandle, FieldOption, FieldOptions, FieldSink, FormData, WidgetKind,
    WidgetRegistry,
};
use crate::error::{FormError, FormResult};
use crate::schema::{EnumTarget, PropertyEntry, SchemaNavigator};

/// Position of the walk inside nested sub-forms
#[derive(Debug, Clone, Default)]
struct Scope {
    name_prefix: String,
    /// Property names leading to this sub-form, used for nested data
    path: Vec<String>,
    title_path: Vec<String>,
    /// Pointers of the sub-schemas being walked
    ancestors: Vec<String>,
    depth: usize,
}

pub struct FormAssembler<'a> {
    schema: &'a Value,
    settings: &'a FormSettings,
    registry: &'a WidgetRegistry,
    data: Option<&'a FormData>,
    options: Option<&'a FieldOptions>,
    errors: Option<&'a FieldErrors>,
    name_prefix: String,
}

impl<'a> FormAssembler<'a> {
    pub fn new(schema: &'a Value, settings: &'a FormSettings, registry: &'a WidgetRegistry) -> Self {
        Self {
            schema,
            settings,
            registry,
            data: None,
            options: None,
            errors: None,
            name_prefix: String::new(),
        }
    }

    pub fn with_data(mut self, data: &'a FormData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_options(mut self, options: &'a FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_errors(mut self, errors: &'a FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_name_prefix(mut self, prefix: &str) -> Self {
        self.name_prefix = prefix.to_string();
        self
    }

    /// Emit one field per property into `sink`, returning how many were added
    pub fn build<S: FieldSink>(&self, sink: &mut S) -> FormResult<usize> {
        let title = self.schema.get("title").and_then(Value::as_str).unwrap_or("untitled");
        info!("Building form '{}'", title);

        let scope = Scope {
            name_prefix: self.name_prefix.clone(),
            ..Default::default()
        };
        let emitted = self.build_schema(self.schema, sink, &scope)?;

        info!("Form '{}' built with {} fields", title, emitted);
        Ok(emitted)
    }

    fn build_schema<S: FieldSink>(&self, schema: &Value, sink: &mut S, scope: &Scope) -> FormResult<usize> {
        let navigator = SchemaNavigator::new(self.schema);
        let resolver = FieldResolver::new(self.settings, self.registry);
        let mut emitted = 0;

        for entry in navigator.properties(schema) {
            let entry = entry?;
            let qualified = format!("{}{}", scope.name_prefix, entry.name);
            let option = self.effective_option(&qualified, entry.name, scope);

            let mut field = resolver.resolve(&FieldRequest {
                name: entry.name,
                property: &entry.property,
                required: entry.required,
                option: &option,
                name_prefix: &scope.name_prefix,
                title_path: &scope.title_path,
            })?;

            let mut handle = if field.kind == WidgetKind::Select {
                match navigator.resolve_enum(&entry.property)? {
                    EnumTarget::SubSchema { schema: sub_schema, pointer } => {
                        let origin = pointer.or_else(|| entry.pointer.clone());
                        let sub_scope = self.enter(scope, &entry, &option, origin)?;
                        debug!("Field '{}' is a sub-form", qualified);
                        emitted += self.build_schema(sub_schema, sink, &sub_scope)?;
                        continue;
                    }
                    EnumTarget::Choices(choices) => {
                        field.choices = Some(choices.to_vec());
                        sink.create_choice_field(field.kind, &field, choices)?
                    }
                    EnumTarget::Leaf(_) => {
                        return Err(FormError::EnumResolution {
                            field: qualified,
                            reason: "no enum, items, $ref or properties to build choices from".to_string(),
                        })
                    }
                }
            } else {
                sink.create_field(field.kind, &field)?
            };

            if let Some(messages) = self.errors.and_then(|errors| errors.get(&qualified)) {
                handle.set_errors(messages);
            }
            sink.add_field(handle);
            emitted += 1;
        }

        Ok(emitted)
    }

    /// Options of a field with its current data injected as the lowest
    /// precedence `value` attribute
    fn effective_option(&self, qualified: &str, name: &str, scope: &Scope) -> FieldOption {
        let mut option = self
            .options
            .and_then(|options| options.get(qualified))
            .cloned()
            .unwrap_or_default();

        if let Some(value) = self.current_value(qualified, name, scope) {
            let mut attrs = Attributes::new();
            attrs.insert("value".to_string(), value.clone());
            merge_into(&mut attrs, &option.attrs);
            option.attrs = attrs;
        }
        option
    }

    /// Flat `address.city` key first, then nested `{"address": {"city": ..}}`
    fn current_value(&self, qualified: &str, name: &str, scope: &Scope) -> Option<&'a Value> {
        let data = self.data?;
        if let Some(value) = data.get(qualified) {
            return Some(value);
        }
        let (first, rest) = match scope.path.split_first() {
            Some(split) => split,
            None => return None,
        };
        let mut node = data.get(first)?;
        for segment in rest {
            node = node.get(segment)?;
        }
        node.get(name)
    }

    fn enter(
        &self,
        scope: &Scope,
        entry: &PropertyEntry<'_>,
        option: &FieldOption,
        origin: Option<String>,
    ) -> FormResult<Scope> {
        let qualified = format!("{}{}", scope.name_prefix, entry.name);

        if scope.depth + 1 > self.settings.max_depth {
            return Err(FormError::DepthExceeded {
                field: qualified,
                max_depth: self.settings.max_depth,
            });
        }

        let mut ancestors = scope.ancestors.clone();
        if let Some(pointer) = origin {
            if ancestors.contains(&pointer) {
                return Err(FormError::CyclicReference(pointer));
            }
            ancestors.push(pointer);
        }

        let title = option
            .title
            .clone()
            .or_else(|| entry.property.get("title").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| entry.name.to_string());

        let mut path = scope.path.clone();
        path.push(entry.name.to_string());
        let mut title_path = scope.title_path.clone();
        title_path.push(title);

        Ok(Scope {
            name_prefix: format!("{}{}", qualified, self.settings.name_separator),
            path,
            title_path,
            ancestors,
            depth: scope.depth + 1,
        })
    }
}

/// Build `schema` into `sink` with default widgets
pub fn build<S: FieldSink>(
    schema: &Value,
    sink: &mut S,
    data: &FormData,
    options: &FieldOptions,
    settings: &FormSettings,
) -> FormResult<usize> {
    let registry = WidgetRegistry::default();
    FormAssembler::new(schema, settings, &registry)
        .with_data(data)
        .with_options(options)
        .build(sink)
}
