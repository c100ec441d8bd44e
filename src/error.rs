//! Error types for form generation

use thiserror::Error;

/// Errors that can occur while turning a schema into form fields
///
/// None of these are recovered inside the crate: a failing property aborts
/// the whole build and the error is handed back to the caller.
#[derive(Debug, Error)]
pub enum FormError {
    /// A `$ref` pointer could not be followed
    #[error("Pointer error: cannot resolve '{pointer}': {reason}")]
    Pointer { pointer: String, reason: String },

    /// A select widget was resolved but no choices or sub-schema were found
    #[error("Enum resolution error for field '{field}': {reason}")]
    EnumResolution { field: String, reason: String },

    /// No widget handler registered under this name
    #[error("Unknown widget '{widget}' for field '{field}'")]
    UnknownWidget { widget: String, field: String },

    /// A pointer chain or a sub-form leads back to itself
    #[error("Cyclic reference: '{0}' is already being resolved")]
    CyclicReference(String),

    /// Sub-form nesting went past the configured limit
    #[error("Maximum sub-form depth ({max_depth}) exceeded at '{field}'")]
    DepthExceeded { field: String, max_depth: usize },

    /// The schema does not declare the requested property
    #[error("Property not found: '{0}'")]
    MissingProperty(String),

    /// The schema document has an unexpected shape
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Template rendering error from the HTML sink
    #[error("Render error: {0}")]
    Render(#[from] tera::Error),
}

impl FormError {
    pub(crate) fn pointer(pointer: &str, reason: impl Into<String>) -> Self {
        FormError::Pointer {
            pointer: pointer.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for form generation
pub type FormResult<T> = Result<T, FormError>;
