pub mod html_sink;
pub mod loader;
pub mod memory_sink;

pub use html_sink::{HtmlField, HtmlSink};
pub use loader::{load_document, load_optional};
pub use memory_sink::{RecordedField, RecordingSink};
