//! Processor configuration files
//!
//! Options can be stored next to the stylesheets in a JSON or YAML file:
//!
//! ```yaml
//! scope: "%exports"
//! rename: camelCase
//! dependencies:
//!   - path: theme/_colors.scss
//!     scope: "%theme"
//! ```
//!
//! Relative dependency paths are resolved against the config file's directory.
//! A rename closure cannot be stored in a file, so keys are renamed through a
//! named [`RenameRule`].

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::vars::error::{IoContext, VarsError, VarsResult};
use crate::vars::processor::{Dependency, ProcessorOptions};

/// Case conversion applied to exported keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum RenameRule {
    #[serde(rename = "camelCase")]
    #[value(name = "camelCase")]
    CamelCase,
    #[serde(rename = "snake_case")]
    #[value(name = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    #[value(name = "kebab-case")]
    KebabCase,
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    #[value(name = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
}

impl RenameRule {
    /// Converts a variable name such as `primary-color` or `fontSize`
    pub fn apply(&self, name: &str) -> String {
        let words = split_words(name);
        match self {
            RenameRule::CamelCase => words
                .iter()
                .enumerate()
                .map(|(index, word)| {
                    if index == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
            RenameRule::SnakeCase => words.join("_").to_lowercase(),
            RenameRule::KebabCase => words.join("-").to_lowercase(),
            RenameRule::ScreamingSnakeCase => words.join("_").to_uppercase(),
        }
    }
}

/// Splits on `-`, `_` and lower-to-upper case boundaries
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;

    for c in name.chars() {
        if c == '-' || c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }

        if c.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A dependency entry of a config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Processor options as stored in a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VarsConfig {
    pub scope: Option<String>,
    pub rename: Option<RenameRule>,
    pub dependencies: Vec<DependencyConfig>,
}

impl VarsConfig {
    /// Loads a `.json`, `.yaml` or `.yml` config file
    pub fn load(path: &Path) -> VarsResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let content = fs::read_to_string(path).with_io_context(path)?;
        let mut config: VarsConfig = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content).map_err(|e| VarsError::Json {
                path: path.to_path_buf(),
                source: e,
            })?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| VarsError::Yaml {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
            _ => {
                return Err(VarsError::UnsupportedConfig {
                    path: path.to_path_buf(),
                });
            }
        };

        if let Some(base_dir) = path.parent() {
            config.resolve_paths(base_dir);
        }
        debug!("Loaded config {:?}: {:?}", path, config);

        Ok(config)
    }

    /// Makes relative dependency paths relative to `base_dir`
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for dependency in &mut self.dependencies {
            if dependency.path.is_relative() {
                dependency.path = base_dir.join(&dependency.path);
            }
        }
    }

    pub fn into_options(self) -> ProcessorOptions {
        let mut options = ProcessorOptions {
            scope: self.scope,
            rename: None,
            dependencies: self
                .dependencies
                .into_iter()
                .map(|dependency| Dependency {
                    path: dependency.path,
                    scope: dependency.scope,
                })
                .collect(),
        };

        if let Some(rule) = self.rename {
            options = options.with_rename(move |name| rule.apply(name));
        }
        options
    }
}
