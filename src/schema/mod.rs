//! JSON Schema navigation
//!
//! Resolves `$ref` pointers and `anyOf` unions, lists the properties of a
//! schema and follows enum/items/pointer chains to find choices or nested
//! sub-forms.

pub mod navigator;
pub mod node;

pub use navigator::{classify_format, reduce_any_of, EnumTarget, PropertyEntry, SchemaNavigator};
pub use node::SchemaNode;
