use serde_json::{json, Value};
use yajsf::adapters::RecordingSink;
use yajsf::config::FormSettings;
use yajsf::domain::WidgetRegistry;
use yajsf::{FormAssembler, FormResult};

/// Schema exercising sub-forms, enums, unions and defaults
pub fn signup_schema() -> Value {
    json!({
        "title": "Signup",
        "type": "object",
        "required": ["email", "plan"],
        "properties": {
            "email": {"type": "string", "format": "email", "title": "Email"},
            "plan": {"title": "Plan", "enum": ["free", "pro", "team"]},
            "birthday": {
                "title": "Birthday",
                "anyOf": [
                    {"type": "string"},
                    {"type": "string", "format": "date"},
                    {"type": "null"}
                ]
            },
            "address": {"$ref": "#/definitions/Address"},
            "newsletter": {"type": "boolean", "title": "Newsletter", "default": true},
            "tags": {
                "type": "array",
                "title": "Tags",
                "items": {"$ref": "#/definitions/Tag"}
            }
        },
        "definitions": {
            "Address": {
                "type": "object",
                "title": "Address",
                "required": ["city"],
                "properties": {
                    "street": {"type": "string", "title": "Street"},
                    "city": {"type": "string", "title": "City", "maxLength": 40}
                }
            },
            "Tag": {"enum": ["rust", "web", "cli"]}
        }
    })
}

#[allow(dead_code)]
pub fn record(schema: &Value) -> FormResult<RecordingSink> {
    let settings = FormSettings::default();
    let registry = WidgetRegistry::default();
    let mut sink = RecordingSink::new();
    FormAssembler::new(schema, &settings, &registry).build(&mut sink)?;
    Ok(sink)
}
