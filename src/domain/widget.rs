//! Widget kinds and the registry mapping widget names onto them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{FormError, FormResult};

/// Closed set of field kinds a sink knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Input,
    Select,
    #[serde(rename = "textarea")]
    TextArea,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Input => "input",
            WidgetKind::Select => "select",
            WidgetKind::TextArea => "textarea",
        }
    }
}

/// Name → kind table, populated before any form is built
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    widgets: HashMap<String, WidgetKind>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("input", WidgetKind::Input);
        registry.register("select", WidgetKind::Select);
        registry.register("textarea", WidgetKind::TextArea);
        registry
    }
}

impl WidgetRegistry {
    /// Registry without any widget, mostly useful in tests
    pub fn empty() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    /// Register (or replace) a widget name
    pub fn register(&mut self, name: &str, kind: WidgetKind) -> &mut Self {
        self.widgets.insert(name.to_string(), kind);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.widgets.contains_key(name)
    }

    /// Look a widget up for `field`, failing loudly when it is not registered
    pub fn lookup(&self, name: &str, field: &str) -> FormResult<WidgetKind> {
        self.widgets
            .get(name)
            .copied()
            .ok_or_else(|| FormError::UnknownWidget {
                widget: name.to_string(),
                field: field.to_string(),
            })
    }
}
