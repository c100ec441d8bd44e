use thiserror::Error;

use crate::config::{FormSettings, LogSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unknown widget for {field}: '{widget}' is not registered")]
    UnknownWidget { field: String, widget: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_form(settings, &settings.form) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_log(&settings.log) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_form(settings: &Settings, form: &FormSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.default_widget.is_empty() {
            errors.push(ValidationError::MissingField("form.default_widget".to_string()));
        } else if !settings.widget_registry().contains(&form.default_widget) {
            errors.push(ValidationError::UnknownWidget {
                field: "form.default_widget".to_string(),
                widget: form.default_widget.clone(),
            });
        }

        if form.default_number_step.is_nan() || form.default_number_step <= 0.0 {
            errors.push(ValidationError::InvalidValue {
                field: "form.default_number_step".to_string(),
                reason: "Step must be greater than 0".to_string(),
            });
        }

        if form.name_separator.is_empty() {
            errors.push(ValidationError::MissingField("form.name_separator".to_string()));
        }

        if form.max_depth == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "form.max_depth".to_string(),
                reason: "Depth must be at least 1".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_log(log: &LogSettings) -> Result<(), Vec<ValidationError>> {
        if log.level.parse::<tracing::Level>().is_err() {
            return Err(vec![ValidationError::InvalidValue {
                field: "log.level".to_string(),
                reason: format!("'{}' is not a log level", log.level),
            }]);
        }
        Ok(())
    }
}
