//! Shared registry of declarations and use rules.
//!
//! One store lives for a single processor run. Dependencies register their
//! declarations first, so the primary file can reference them. Registering a
//! name twice replaces the earlier declaration.

use std::collections::HashMap;

use log::debug;

use crate::vars::constants::*;
use crate::vars::declaration::Declaration;
use crate::vars::error::DeclarationError;

/// A registered `@use` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseRule {
    /// The normalized rule text as it appeared in the source
    pub text: String,
    /// Module path without quotes (e.g., `src/colors`, `sass:math`)
    pub path: String,
    /// Namespace members are referenced through, `None` for `as *`
    pub namespace: Option<String>,
}

impl UseRule {
    /// Parses a normalized `@use` line. Never fails; unknown trailing clauses are ignored.
    pub fn parse(text: &str) -> Self {
        let rest = text.strip_prefix(USE_DIRECTIVE).unwrap_or(text).trim();
        let (path, rest) = split_module_path(rest);

        let mut tokens = rest.split_whitespace();
        let alias = match tokens.next() {
            Some(USE_ALIAS_KEYWORD) => tokens.next(),
            _ => None,
        };

        let namespace = match alias {
            Some(USE_ALIAS_WILDCARD) => None,
            Some(alias) => Some(alias.to_string()),
            None => default_namespace(&path),
        };

        Self {
            text: text.to_string(),
            path,
            namespace,
        }
    }
}

/// Splits the (possibly quoted) module path from the rest of the rule
fn split_module_path(rest: &str) -> (String, &str) {
    if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let inner = &rest[1..];
        if let Some(end) = inner.find(quote) {
            return (inner[..end].to_string(), &inner[end + 1..]);
        }
        return (inner.to_string(), "");
    }

    match rest.find(char::is_whitespace) {
        Some(end) => (rest[..end].to_string(), &rest[end..]),
        None => (rest.to_string(), ""),
    }
}

/// Derives the namespace from the last segment of a module path
fn default_namespace(path: &str) -> Option<String> {
    let segment = path.rsplit(['/', ':']).next().unwrap_or(path);
    let segment = segment.strip_prefix(PARTIAL_PREFIX).unwrap_or(segment);
    let segment = STYLESHEET_EXTENSIONS
        .iter()
        .find_map(|ext| segment.strip_suffix(ext))
        .unwrap_or(segment);

    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Registry of every declaration seen during one processor run
#[derive(Debug, Default)]
pub struct DeclarationStore {
    declarations: HashMap<String, Declaration>,
    use_rules: Vec<UseRule>,
}

impl DeclarationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `@use` rule
    pub fn add_use_rule(&mut self, rule_text: &str) {
        let rule = UseRule::parse(rule_text);
        debug!(
            "Registered use rule '{}' (namespace: {:?})",
            rule.path, rule.namespace
        );
        self.use_rules.push(rule);
    }

    /// Store a declaration under its name, replacing any earlier one
    pub fn register(&mut self, declaration: Declaration) {
        self.declarations
            .insert(declaration.name().to_string(), declaration);
    }

    /// Look up a declared variable
    pub fn resolve(&self, name: &str) -> Result<&Declaration, DeclarationError> {
        self.declarations
            .get(name)
            .ok_or_else(|| DeclarationError::UnresolvedReference {
                name: name.to_string(),
            })
    }

    /// Look up a variable referenced through a use rule namespace (e.g., `colors.$primary`)
    pub fn resolve_namespaced(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<&Declaration, DeclarationError> {
        let known = self
            .use_rules
            .iter()
            .any(|rule| rule.namespace.as_deref() == Some(namespace));
        if !known {
            return Err(DeclarationError::UnknownNamespace {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }
        self.resolve(name)
    }

    /// Get a declaration by name, if registered
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Registered use rules in registration order
    pub fn use_rules(&self) -> &[UseRule] {
        &self.use_rules
    }

    /// Number of distinct declared names
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare(store: &mut DeclarationStore, line: &str) -> Declaration {
        Declaration::parse(line, store).unwrap()
    }

    #[test]
    fn test_resolve_missing_name() {
        let store = DeclarationStore::new();
        assert_eq!(
            store.resolve("primary").unwrap_err(),
            DeclarationError::UnresolvedReference {
                name: "primary".to_string()
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut store = DeclarationStore::new();
        declare(&mut store, "$a: 1");
        declare(&mut store, "$a: 2");

        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve("a").unwrap().value_text(), "2");
    }

    #[test]
    fn test_use_rules_keep_registration_order() {
        let mut store = DeclarationStore::new();
        store.add_use_rule("@use \"colors\"");
        store.add_use_rule("@use \"sass:math\" as m");

        let paths: Vec<&str> = store.use_rules().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["colors", "sass:math"]);
    }

    #[test]
    fn test_use_rule_default_namespace() {
        let rule = UseRule::parse("@use \"src/_colors.scss\"");
        assert_eq!(rule.path, "src/_colors.scss");
        assert_eq!(rule.namespace.as_deref(), Some("colors"));

        let rule = UseRule::parse("@use 'sass:math'");
        assert_eq!(rule.namespace.as_deref(), Some("math"));
    }

    #[test]
    fn test_use_rule_alias() {
        let rule = UseRule::parse("@use \"theme/colors\" as c");
        assert_eq!(rule.namespace.as_deref(), Some("c"));

        let rule = UseRule::parse("@use \"theme/colors\" as *");
        assert_eq!(rule.namespace, None);
    }

    #[test]
    fn test_use_rule_ignores_with_clause() {
        let rule = UseRule::parse("@use \"library\" with ($black: #222, $border-radius: 0.1rem)");
        assert_eq!(rule.path, "library");
        assert_eq!(rule.namespace.as_deref(), Some("library"));
    }

    #[test]
    fn test_use_rule_unquoted_path() {
        let rule = UseRule::parse("@use colors as c");
        assert_eq!(rule.path, "colors");
        assert_eq!(rule.namespace.as_deref(), Some("c"));
    }

    #[test]
    fn test_resolve_namespaced() {
        let mut store = DeclarationStore::new();
        declare(&mut store, "$primary: blue");

        assert_eq!(
            store.resolve_namespaced("colors", "primary").unwrap_err(),
            DeclarationError::UnknownNamespace {
                namespace: "colors".to_string(),
                name: "primary".to_string()
            }
        );

        store.add_use_rule("@use \"colors\"");
        assert_eq!(
            store.resolve_namespaced("colors", "primary").unwrap().value_text(),
            "blue"
        );
    }
}
