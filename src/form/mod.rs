//! Field resolution and form assembly

pub mod assembler;
pub mod merge;
pub mod resolver;

pub use assembler::{build, FormAssembler};
pub use merge::deep_merge;
pub use resolver::{FieldRequest, FieldResolver, FormatDefaults};
