//! Source processor
//!
//! Reads a stylesheet, optionally restricts it to a scope block, parses its
//! variable declarations and exports them as a flat name/value mapping.
//! Dependencies are processed first against the same store so the primary
//! file can reference their variables; their own declarations are never
//! exported.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::vars::constants::LINE_DELIMITER;
use crate::vars::declaration::Declaration;
use crate::vars::declaration_store::DeclarationStore;
use crate::vars::error::{IoContext, VarsError, VarsResult};
use crate::vars::line_utils::{is_declaration_line, is_use_rule, normalize_line};
use crate::vars::scope_extractor::scope_range;

/// Function mapping a variable name to its exported key
pub type RenameFn = Box<dyn Fn(&str) -> String>;

/// A file parsed before the primary file to provide variables for resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub path: PathBuf,
    pub scope: Option<String>,
}

impl Dependency {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Options controlling a processor run
#[derive(Default)]
pub struct ProcessorOptions {
    /// Restrict parsing to the first block introduced by this scope; only
    /// `!global` declarations are exported when set
    pub scope: Option<String>,
    /// Transform applied to every exported key
    pub rename: Option<RenameFn>,
    /// Files parsed first, in order, for reference resolution only
    pub dependencies: Vec<Dependency>,
}

impl ProcessorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_rename(mut self, rename: impl Fn(&str) -> String + 'static) -> Self {
        self.rename = Some(Box::new(rename));
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Checks scopes and dependency paths before anything is read
    pub fn validate(&self) -> VarsResult<()> {
        validate_scope(self.scope.as_deref(), "scope")?;

        for (index, dependency) in self.dependencies.iter().enumerate() {
            if dependency.path.as_os_str().is_empty() {
                return Err(VarsError::InvalidOptions {
                    message: format!("dependency #{} has an empty path", index + 1),
                });
            }
            validate_scope(
                dependency.scope.as_deref(),
                &format!("scope of dependency {:?}", dependency.path),
            )?;
        }

        Ok(())
    }

    fn export_key(&self, name: &str) -> String {
        match &self.rename {
            Some(rename) => rename(name),
            None => name.to_string(),
        }
    }
}

impl fmt::Debug for ProcessorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorOptions")
            .field("scope", &self.scope)
            .field("rename", &self.rename.as_ref().map(|_| "<fn>"))
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

fn validate_scope(scope: Option<&str>, what: &str) -> VarsResult<()> {
    match scope {
        Some(scope) if scope.trim().is_empty() => Err(VarsError::InvalidOptions {
            message: format!("{} must not be empty", what),
        }),
        _ => Ok(()),
    }
}

/// Result of one processor run
#[derive(Debug, Clone)]
pub struct Processor {
    object: HashMap<String, String>,
}

impl Processor {
    /// Processes the dependencies and then `path`, failing as a whole on the first error
    pub fn new(path: impl AsRef<Path>, options: &ProcessorOptions) -> VarsResult<Self> {
        options.validate()?;

        let mut store = DeclarationStore::new();

        for dependency in &options.dependencies {
            debug!("Processing dependency {:?}", dependency.path);
            declarations_from_file(&dependency.path, dependency.scope.as_deref(), &mut store)?;
        }

        let path = path.as_ref();
        debug!("Processing {:?}", path);
        let declarations = declarations_from_file(path, options.scope.as_deref(), &mut store)?;

        let object = make_object(&declarations, options);
        info!("Exported {} variables from {:?}", object.len(), path);

        Ok(Self { object })
    }

    /// The exported name/value mapping
    pub fn object(&self) -> &HashMap<String, String> {
        &self.object
    }

    pub fn into_object(self) -> HashMap<String, String> {
        self.object
    }
}

/// Reads `path` and parses its declarations into `store`
fn declarations_from_file(
    path: &Path,
    scope: Option<&str>,
    store: &mut DeclarationStore,
) -> VarsResult<Vec<Declaration>> {
    let content = fs::read_to_string(path).with_io_context(path)?;
    declarations_from_source(path, &content, scope, store)
}

/// Parses declarations from already loaded source text
pub(crate) fn declarations_from_source(
    path: &Path,
    content: &str,
    scope: Option<&str>,
    store: &mut DeclarationStore,
) -> VarsResult<Vec<Declaration>> {
    let (text, first_line) = match scope.and_then(|scope| scope_range(content, scope)) {
        Some(range) => {
            let offset = content[..range.start].matches(LINE_DELIMITER).count();
            (&content[range], offset + 1)
        }
        None => {
            if let Some(scope) = scope {
                debug!("Scope '{}' not found in {:?}, using the whole file", scope, path);
            }
            (content, 1)
        }
    };

    let lines: Vec<(usize, &str)> = text
        .split(LINE_DELIMITER)
        .map(normalize_line)
        .enumerate()
        .map(|(index, line)| (first_line + index, line))
        .collect();

    for (_, line) in lines.iter().filter(|(_, line)| is_use_rule(line)) {
        store.add_use_rule(line);
    }

    lines
        .iter()
        .filter(|(_, line)| is_declaration_line(line))
        .map(|(line_number, line)| {
            Declaration::parse(line, store).map_err(|source| VarsError::Declaration {
                path: path.to_path_buf(),
                line: *line_number,
                text: line.to_string(),
                source,
            })
        })
        .collect()
}

/// Projects the primary file's declarations into the exported mapping
fn make_object(declarations: &[Declaration], options: &ProcessorOptions) -> HashMap<String, String> {
    let mut object = HashMap::new();

    for declaration in declarations {
        if options.scope.is_some() && !declaration.is_global() {
            continue;
        }
        object.insert(
            options.export_key(declaration.name()),
            declaration.value_text().to_string(),
        );
    }

    object
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
