//! Command line arguments for the `style_vars` binary

use std::path::PathBuf;

use clap::Parser;

use style_vars::config::{RenameRule, VarsConfig};
use style_vars::vars::{Dependency, ProcessorOptions, VarsResult};

/// Separates a dependency path from its scope in `--dependency <path>=<scope>`
const DEPENDENCY_SCOPE_SEPARATOR: char = '=';

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "style_vars",
    version,
    about = "Export stylesheet variables as JSON"
)]
pub struct CliArgs {
    /// Stylesheet whose variables are exported
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// JSON or YAML file with scope, rename and dependencies
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only parse the first block introduced by this scope and export its `!global` variables
    #[arg(long, value_name = "NAME")]
    pub scope: Option<String>,

    /// Case conversion applied to exported keys
    #[arg(long, value_enum)]
    pub rename: Option<RenameRule>,

    /// File parsed first for reference resolution, optionally restricted to a scope (repeatable)
    #[arg(long = "dependency", value_name = "PATH[=SCOPE]", value_parser = parse_dependency)]
    pub dependencies: Vec<Dependency>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_dependency(value: &str) -> Result<Dependency, String> {
    let dependency = match value.rsplit_once(DEPENDENCY_SCOPE_SEPARATOR) {
        Some((path, scope)) => Dependency::new(path).with_scope(scope),
        None => Dependency::new(value),
    };
    if dependency.path.as_os_str().is_empty() {
        return Err("dependency path must not be empty".to_string());
    }
    Ok(dependency)
}

impl CliArgs {
    /// Merges the config file (if any) with the command line flags; flags win
    pub fn into_options(self) -> VarsResult<(PathBuf, ProcessorOptions)> {
        let mut config = match &self.config {
            Some(config_path) => VarsConfig::load(config_path)?,
            None => VarsConfig::default(),
        };

        if self.scope.is_some() {
            config.scope = self.scope;
        }
        if self.rename.is_some() {
            config.rename = self.rename;
        }

        let mut options = config.into_options();
        options.dependencies.extend(self.dependencies);

        Ok((self.path, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(values: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("style_vars").chain(values.iter().copied()))
    }

    #[test]
    fn test_parse_path_only() {
        let parsed = parse(&["main.scss"]).unwrap();

        assert_eq!(parsed.path, PathBuf::from("main.scss"));
        assert_eq!(parsed.config, None);
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.rename, None);
        assert!(parsed.dependencies.is_empty());
        assert!(!parsed.verbose);
    }

    #[test]
    fn test_parse_all_flags() {
        let parsed = parse(&[
            "--scope",
            "%exports",
            "main.scss",
            "--rename",
            "camelCase",
            "--dependency",
            "base.scss",
            "--dependency",
            "theme.scss=%theme",
            "--config",
            "vars.yml",
            "-v",
        ])
        .unwrap();

        assert_eq!(parsed.path, PathBuf::from("main.scss"));
        assert_eq!(parsed.scope.as_deref(), Some("%exports"));
        assert_eq!(parsed.rename, Some(RenameRule::CamelCase));
        assert_eq!(parsed.config, Some(PathBuf::from("vars.yml")));
        assert_eq!(
            parsed.dependencies,
            vec![
                Dependency::new("base.scss"),
                Dependency::new("theme.scss").with_scope("%theme"),
            ]
        );
        assert!(parsed.verbose);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["main.scss", "other.scss"]).is_err());
        assert!(parse(&["main.scss", "--scope"]).is_err());
        assert!(parse(&["main.scss", "--rename", "PascalCase"]).is_err());
        assert!(parse(&["main.scss", "--dependency", "=%theme"]).is_err());
        assert!(parse(&["main.scss", "--watch"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("vars.json");
        fs::write(
            &config_path,
            r#"{ "scope": "%config", "rename": "snake_case", "dependencies": [{ "path": "base.scss" }] }"#,
        )
        .unwrap();

        let parsed = parse(&[
            "main.scss",
            "--config",
            config_path.to_str().unwrap(),
            "--scope",
            "%cli",
            "--dependency",
            "extra.scss",
        ])
        .unwrap();
        let (path, options) = parsed.into_options().unwrap();

        assert_eq!(path, PathBuf::from("main.scss"));
        assert_eq!(options.scope.as_deref(), Some("%cli"));
        assert_eq!(
            options.dependencies,
            vec![
                Dependency::new(temp_dir.path().join("base.scss")),
                Dependency::new("extra.scss"),
            ]
        );
        let rename = options.rename.as_ref().unwrap();
        assert_eq!(rename("primaryColor"), "primary_color");
    }
}
