//! Stylesheet variable extraction
//!
//! Turns `$name: value;` declarations of SCSS-like sources into a flat
//! name/value mapping:
//! - line normalization and filtering of comments and directives
//! - scope block extraction
//! - declaration parsing with reference resolution against a shared store
//! - the processor tying these together across dependency files

pub mod constants;
pub mod declaration;
pub mod declaration_store;
pub mod error;
pub mod line_utils;
pub mod processor;
pub mod scope_extractor;

pub use declaration::Declaration;
pub use declaration_store::{DeclarationStore, UseRule};
pub use error::{DeclarationError, VarsError, VarsResult};
pub use processor::{Dependency, Processor, ProcessorOptions};
