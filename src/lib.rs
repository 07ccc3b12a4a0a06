//! Style Vars Library
//!
//! This library extracts `$variable` declarations from SCSS-like stylesheets
//! into a flat name/value mapping, following dependency files and optional
//! scope blocks.

pub mod config;
pub mod vars;
#[cfg(test)]
pub mod test_utils;
