//! Error types for variable extraction
//!
//! Line level failures are reported as [`DeclarationError`]; the processor wraps
//! them into [`VarsError`] together with the file and line they came from.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing a single declaration line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// The line has no `$name: value` shape
    #[error("Malformed declaration: '{line}'")]
    MalformedDeclaration { line: String },

    /// The value references a variable that has not been declared yet
    #[error("Undefined variable '${name}'")]
    UnresolvedReference { name: String },

    /// The value references a namespace no `@use` rule introduced
    #[error("Unknown namespace '{namespace}' in reference '{namespace}.${name}'")]
    UnknownNamespace { namespace: String, name: String },
}

/// Main error type for processor runs
#[derive(Error, Debug)]
pub enum VarsError {
    /// Source or config file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declaration line failed to parse or resolve
    #[error("{path:?}:{line}: {source} (in '{text}')")]
    Declaration {
        path: PathBuf,
        line: usize,
        text: String,
        #[source]
        source: DeclarationError,
    },

    /// Processor options failed validation
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// JSON config parsing errors
    #[error("JSON config error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML config parsing errors
    #[error("YAML config error in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Config file extension is neither JSON nor YAML
    #[error("Unsupported config format: {path:?} (expected .json, .yaml or .yml)")]
    UnsupportedConfig { path: PathBuf },
}

/// Result type alias for processor operations
pub type VarsResult<T> = Result<T, VarsError>;

/// Helper trait for attaching a path to IO errors
pub trait IoContext<T> {
    fn with_io_context(self, path: impl Into<PathBuf>) -> VarsResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, path: impl Into<PathBuf>) -> VarsResult<T> {
        self.map_err(|e| VarsError::Io {
            path: path.into(),
            source: e,
        })
    }
}
