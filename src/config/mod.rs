use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub mod validator;

use crate::cli::Cli;
use crate::domain::{WidgetKind, WidgetRegistry};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub log: LogSettings,
    /// Extra widget names, e.g. `hidden = "input"`
    #[serde(default)]
    pub widgets: HashMap<String, WidgetKind>,
}

/// Settings driving field resolution
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormSettings {
    /// Widget used when a property has no enum, format or type
    pub default_widget: String,
    /// `step` attribute of number inputs
    pub default_number_step: f64,
    /// Prepended to every field label
    pub title_prefix: String,
    /// Joins the parts of a composed label
    pub title_separator: String,
    /// Marker put in front of required field labels
    pub required_title_prefix: String,
    /// Joins a sub-form name to its nested field names
    pub name_separator: String,
    /// Maximum sub-form nesting
    pub max_depth: usize,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            default_widget: "textarea".to_string(),
            default_number_step: 0.01,
            title_prefix: String::new(),
            title_separator: "―".to_string(),
            required_title_prefix: "*".to_string(),
            name_separator: ".".to_string(),
            max_depth: 20,
        }
    }
}

/// Settings of the HTML sink
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Custom element prefix, `y-` gives `<y-input>`
    pub element_prefix: String,
    /// Disable browser validation on the form element
    pub novalidate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            element_prefix: "y-".to_string(),
            novalidate: false,
            form_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_path(Path::new("yajsf.toml"))
    }

    /// Load settings from an optional file, then `YAJSF_*` environment
    /// variables (`YAJSF_FORM__DEFAULT_WIDGET=input`)
    pub fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("form.default_widget", "textarea")?
            .set_default("log.level", "info")?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("YAJSF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validated()
    }

    /// Create settings from CLI arguments (CLI > env vars > config file)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("form.default_widget", "textarea")?
            .set_default("log.level", "info")?
            .add_source(File::from(cli.config.clone()).required(false))
            .add_source(
                Environment::with_prefix("YAJSF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.apply_cli_overrides(cli);
        settings.validated()
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(widget) = &cli.default_widget {
            self.form.default_widget = widget.clone();
        }
        if let Some(prefix) = &cli.title_prefix {
            self.form.title_prefix = prefix.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
        if let Some(novalidate) = cli.novalidate {
            self.render.novalidate = novalidate;
        }
    }

    fn validated(self) -> Result<Self, anyhow::Error> {
        validator::ConfigValidator::validate(&self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;
        Ok(self)
    }

    /// Default widgets plus the aliases declared under `[widgets]`
    pub fn widget_registry(&self) -> WidgetRegistry {
        let mut registry = WidgetRegistry::default();
        for (name, kind) in &self.widgets {
            registry.register(name, *kind);
        }
        registry
    }

    /// Level for the tracing subscriber, `info` when unparsable
    pub fn log_level(&self) -> tracing::Level {
        self.log.level.parse().unwrap_or(tracing::Level::INFO)
    }
}
