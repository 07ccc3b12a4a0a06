//! Test utilities shared across the codebase

use std::fs;
use std::path::{Path, PathBuf};

/// Writes a fixture file below `dir`, creating parent directories, and returns its path
pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}
