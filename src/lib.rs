//! # yajsf - form fields from JSON Schema
//!
//! Walks the properties of a JSON Schema document and turns each one into a
//! form field: an `<input>`, a `<select>` or a `<textarea>`, with HTML
//! attributes derived from the property type, format and constraints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use yajsf::adapters::HtmlSink;
//! use yajsf::config::Settings;
//! use yajsf::form::FormAssembler;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let registry = settings.widget_registry();
//!     let schema = json!({
//!         "title": "Signup",
//!         "required": ["email"],
//!         "properties": {
//!             "email": {"type": "string", "format": "email"},
//!             "age": {"type": "integer", "minimum": 18, "maximum": 30}
//!         }
//!     });
//!
//!     let mut sink = HtmlSink::new(settings.render.clone())?;
//!     FormAssembler::new(&schema, &settings.form, &registry).build(&mut sink)?;
//!     println!("{}", sink.render()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Schema**: pointer resolution, `anyOf` reduction, enum chasing
//! - **Form**: per-property field resolution and sub-form flattening
//! - **Domain**: field descriptors, widget registry and the sink ports
//! - **Adapters**: HTML and in-memory sinks, document loading
//! - **Config**: layered settings and their validation

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod schema;

pub use domain::{FieldHandle, FieldSink, ResolvedField, WidgetKind, WidgetRegistry};
pub use error::{FormError, FormResult};
pub use form::FormAssembler;
pub use schema::SchemaNavigator;
