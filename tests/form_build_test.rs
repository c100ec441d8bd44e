mod common;

use serde_json::{json, Value};
use yajsf::adapters::RecordingSink;
use yajsf::config::FormSettings;
use yajsf::domain::{FieldErrors, FieldOption, FieldOptions, FieldSink, FormData, WidgetKind, WidgetRegistry};
use yajsf::{FormAssembler, FormError};

fn as_data(value: Value) -> FormData {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_fields_follow_declaration_order() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    assert_eq!(
        sink.names(),
        ["email", "plan", "birthday", "address.street", "address.city", "newsletter", "tags"]
    );
    Ok(())
}

#[test]
fn test_required_fields() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    let email = sink.get("email").unwrap();
    assert_eq!(email.kind, WidgetKind::Input);
    assert_eq!(email.attribute("type"), Some(&json!("email")));
    assert_eq!(email.attribute("required"), Some(&json!("required")));
    assert_eq!(email.field.label, "* Email");

    let street = sink.get("address.street").unwrap();
    assert!(street.attribute("required").is_none());
    Ok(())
}

#[test]
fn test_sub_form_is_flattened() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    assert!(sink.get("address").is_none());
    let city = sink.get("address.city").unwrap();
    assert_eq!(city.field.label, "* Address ― City");
    assert_eq!(city.attribute("maxlength"), Some(&json!(40)));
    assert_eq!(city.attribute("name"), Some(&json!("address.city")));
    Ok(())
}

#[test]
fn test_enum_choices_keep_order() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    let plan = sink.get("plan").unwrap();
    assert_eq!(plan.kind, WidgetKind::Select);
    let values: Vec<&str> = plan.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["free", "pro", "team"]);
    assert!(plan.selected().is_none());
    assert_eq!(plan.field.choices.as_ref().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn test_array_items_reference_gives_multiple_select() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    let tags = sink.get("tags").unwrap();
    assert_eq!(tags.kind, WidgetKind::Select);
    assert_eq!(tags.attribute("multiple"), Some(&json!("multiple")));
    let values: Vec<&str> = tags.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["rust", "web", "cli"]);
    Ok(())
}

#[test]
fn test_any_of_picks_formatted_candidate() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    let birthday = sink.get("birthday").unwrap();
    assert_eq!(birthday.field.format, "date");
    assert_eq!(birthday.attribute("type"), Some(&json!("date")));
    assert_eq!(birthday.field.label, "Birthday");
    Ok(())
}

#[test]
fn test_checkbox_default() -> anyhow::Result<()> {
    let sink = common::record(&common::signup_schema())?;

    let newsletter = sink.get("newsletter").unwrap();
    assert_eq!(newsletter.attribute("type"), Some(&json!("checkbox")));
    assert_eq!(newsletter.attribute("checked"), Some(&json!("checked")));
    assert_eq!(newsletter.attribute("value"), Some(&json!(true)));
    Ok(())
}

#[test]
fn test_build_is_repeatable() -> anyhow::Result<()> {
    let schema = common::signup_schema();
    let first = common::record(&schema)?;
    let second = common::record(&schema)?;

    assert_eq!(first.fields(), second.fields());
    Ok(())
}

#[test]
fn test_data_sets_values_and_selection() -> anyhow::Result<()> {
    let schema = common::signup_schema();
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let data = as_data(json!({
        "email": "ada@example.com",
        "plan": "pro",
        "address": {"city": "Paris"},
        "address.street": "Rue de Rivoli",
        "newsletter": false
    }));

    let mut sink = RecordingSink::new();
    let count = FormAssembler::new(&schema, &settings, &registry)
        .with_data(&data)
        .build(&mut sink)?;
    assert_eq!(count, 7);

    assert_eq!(sink.get("email").unwrap().attribute("value"), Some(&json!("ada@example.com")));
    assert_eq!(sink.get("plan").unwrap().selected().map(|o| o.value.as_str()), Some("pro"));
    assert_eq!(sink.get("address.city").unwrap().attribute("value"), Some(&json!("Paris")));
    assert_eq!(
        sink.get("address.street").unwrap().attribute("value"),
        Some(&json!("Rue de Rivoli"))
    );

    let newsletter = sink.get("newsletter").unwrap();
    assert!(newsletter.attribute("checked").is_none());

    let form_data = sink.form_data();
    assert_eq!(form_data["address.city"], "Paris");
    assert_eq!(form_data["newsletter"], "false");
    assert_eq!(form_data["birthday"], "");
    Ok(())
}

#[test]
fn test_options_customize_fields() -> anyhow::Result<()> {
    let schema = common::signup_schema();
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let mut options = FieldOptions::new();
    options.insert("email".to_string(), FieldOption::with_widget("textarea"));
    options.insert(
        "address.city".to_string(),
        FieldOption::default().with_attr("placeholder", "Town").with_attr("value", "Lyon"),
    );

    let mut sink = RecordingSink::new();
    FormAssembler::new(&schema, &settings, &registry)
        .with_options(&options)
        .build(&mut sink)?;

    assert_eq!(sink.get("email").unwrap().kind, WidgetKind::TextArea);
    let city = sink.get("address.city").unwrap();
    assert_eq!(city.attribute("placeholder"), Some(&json!("Town")));
    assert_eq!(city.attribute("value"), Some(&json!("Lyon")));
    Ok(())
}

#[test]
fn test_errors_are_attached() -> anyhow::Result<()> {
    let schema = common::signup_schema();
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let mut errors = FieldErrors::new();
    errors.insert("address.city".to_string(), vec!["City is required".to_string()]);

    let mut sink = RecordingSink::new();
    FormAssembler::new(&schema, &settings, &registry)
        .with_errors(&errors)
        .build(&mut sink)?;

    assert_eq!(sink.get("address.city").unwrap().errors, ["City is required"]);
    assert!(sink.get("email").unwrap().errors.is_empty());
    Ok(())
}

#[test]
fn test_name_prefix() -> anyhow::Result<()> {
    let schema = common::signup_schema();
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();

    let mut sink = RecordingSink::new();
    FormAssembler::new(&schema, &settings, &registry)
        .with_name_prefix("user.")
        .build(&mut sink)?;

    assert!(sink.get("user.email").is_some());
    assert!(sink.get("user.address.city").is_some());
    Ok(())
}

#[test]
fn test_nested_titles_default_to_names() -> anyhow::Result<()> {
    let schema = json!({
        "properties": {
            "a": {"type": "object", "properties": {
                "b": {"type": "object", "properties": {
                    "c": {"type": "string"}
                }}
            }}
        }
    });
    let sink = common::record(&schema)?;

    assert_eq!(sink.names(), ["a.b.c"]);
    assert_eq!(sink.get("a.b.c").unwrap().field.label, "a ― b ― c");
    Ok(())
}

#[test]
fn test_depth_limit() {
    let schema = json!({
        "properties": {
            "a": {"type": "object", "properties": {
                "b": {"type": "object", "properties": {
                    "c": {"type": "string"}
                }}
            }}
        }
    });
    let settings = FormSettings {
        max_depth: 1,
        ..Default::default()
    };
    let registry = WidgetRegistry::default();

    let mut sink = RecordingSink::new();
    let err = FormAssembler::new(&schema, &settings, &registry)
        .build(&mut sink)
        .unwrap_err();
    assert!(matches!(err, FormError::DepthExceeded { ref field, max_depth: 1 } if field == "a.b"));
}

#[test]
fn test_self_referencing_schema_is_rejected() {
    let schema = json!({
        "properties": {"node": {"$ref": "#/definitions/Node"}},
        "definitions": {
            "Node": {
                "type": "object",
                "properties": {"child": {"$ref": "#/definitions/Node"}}
            }
        }
    });

    let err = common::record(&schema).unwrap_err();
    assert!(matches!(err, FormError::CyclicReference(ref pointer) if pointer == "#/definitions/Node"));
}

#[test]
fn test_dangling_reference_is_a_pointer_error() {
    let schema = json!({"properties": {"x": {"$ref": "#/definitions/Missing"}}});

    let err = common::record(&schema).unwrap_err();
    assert!(matches!(err, FormError::Pointer { ref pointer, .. } if pointer == "#/definitions/Missing"));
}

#[test]
fn test_unknown_widget_aborts_build() {
    let schema = common::signup_schema();
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let mut options = FieldOptions::new();
    options.insert("plan".to_string(), FieldOption::with_widget("radio"));

    let mut sink = RecordingSink::new();
    let err = FormAssembler::new(&schema, &settings, &registry)
        .with_options(&options)
        .build(&mut sink)
        .unwrap_err();
    assert!(matches!(err, FormError::UnknownWidget { ref widget, ref field } if widget == "radio" && field == "plan"));
}

#[test]
fn test_select_without_choices_is_an_error() {
    let schema = json!({"properties": {"nickname": {"type": "string"}}});
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let mut options = FieldOptions::new();
    options.insert("nickname".to_string(), FieldOption::with_widget("select"));

    let mut sink = RecordingSink::new();
    let err = FormAssembler::new(&schema, &settings, &registry)
        .with_options(&options)
        .build(&mut sink)
        .unwrap_err();
    assert!(matches!(err, FormError::EnumResolution { ref field, .. } if field == "nickname"));
}

#[test]
fn test_registered_alias_resolves() -> anyhow::Result<()> {
    let schema = json!({"properties": {"token": {"type": "string"}}});
    let settings = FormSettings::default();
    let mut registry = WidgetRegistry::default();
    registry.register("hidden", WidgetKind::Input);
    let mut options = FieldOptions::new();
    options.insert(
        "token".to_string(),
        FieldOption::with_widget("hidden").with_attr("type", "hidden"),
    );

    let mut sink = RecordingSink::new();
    FormAssembler::new(&schema, &settings, &registry)
        .with_options(&options)
        .build(&mut sink)?;

    let token = sink.get("token").unwrap();
    assert_eq!(token.field.widget, "hidden");
    assert_eq!(token.kind, WidgetKind::Input);
    assert_eq!(token.attribute("type"), Some(&json!("hidden")));
    Ok(())
}

#[test]
fn test_build_helper_uses_default_registry() -> anyhow::Result<()> {
    let schema = common::signup_schema();
    let mut sink = RecordingSink::new();
    let count = yajsf::form::build(
        &schema,
        &mut sink,
        &FormData::new(),
        &FieldOptions::new(),
        &FormSettings::default(),
    )?;

    assert_eq!(count, sink.fields().len());
    Ok(())
}

#[test]
fn test_multiple_select_marks_every_current_value() -> anyhow::Result<()> {
    let schema = json!({
        "properties": {
            "tags": {
                "type": "array",
                "items": {"enum": ["rust", "web", "cli"]},
                "default": ["web"]
            }
        }
    });
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let selected = |sink: &RecordingSink| -> Vec<String> {
        sink.get("tags")
            .unwrap()
            .options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.clone())
            .collect()
    };

    let sink = common::record(&schema)?;
    assert_eq!(selected(&sink), ["web"]);

    let data = as_data(json!({"tags": ["rust", "cli"]}));
    let mut sink = RecordingSink::new();
    FormAssembler::new(&schema, &settings, &registry)
        .with_data(&data)
        .build(&mut sink)?;

    assert_eq!(selected(&sink), ["rust", "cli"]);
    assert_eq!(sink.form_data()["tags"], json!(["rust", "cli"]));
    Ok(())
}
