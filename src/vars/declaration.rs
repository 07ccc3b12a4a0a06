//! Variable declaration parsing and value resolution.
//!
//! A declaration line has the shape `$name: value [!default] [!global]`.
//! References inside the value are substituted with the already resolved value
//! of earlier declarations:
//!
//! - `$name` is looked up in the store
//! - `namespace.$name` is looked up through a registered `@use` rule
//! - `#{...}` interpolation is replaced by its resolved contents
//!
//! Identifiers start with a letter, `_` or `-`, so `"$5"` stays literal text.
//! Trailing dashes of a name directly followed by another `$` belong to the
//! surrounding text: `$a-$b` is `$a`, `-`, `$b`.
//!
//! Everything else in the value is kept verbatim, so `$a + 2` with `$a: 1`
//! resolves to `1 + 2`. Referencing a variable that is not declared yet is an
//! error; forward references are not supported.

use std::sync::LazyLock;

use regex::Regex;

use crate::vars::constants::*;
use crate::vars::declaration_store::DeclarationStore;
use crate::vars::error::DeclarationError;

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"#\{(?P<interpolation>[^}]*)\}|(?:(?P<namespace>[A-Za-z_-][A-Za-z0-9_-]*)\.)?\$(?P<name>[A-Za-z_-][A-Za-z0-9_-]*)",
    )
    .expect("reference pattern is valid")
});

/// The declared identifier, without its sigil
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub value: String,
}

/// The fully resolved value text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub value: String,
}

/// One parsed `$name: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    variable: Variable,
    value: Value,
    global: bool,
}

impl Declaration {
    /// Parses a normalized line, resolves its value against `store` and registers the result.
    ///
    /// The store keeps a copy; a later declaration of the same name replaces it.
    pub fn parse(line: &str, store: &mut DeclarationStore) -> Result<Self, DeclarationError> {
        let malformed = || DeclarationError::MalformedDeclaration {
            line: line.to_string(),
        };

        let body = line.strip_prefix(VARIABLE_SIGIL).ok_or_else(malformed)?;
        let (name, raw_value) = body
            .split_once(DECLARATION_SEPARATOR)
            .ok_or_else(malformed)?;

        let name = name.trim();
        let valid_start = name.chars().next().is_some_and(is_identifier_start);
        if !valid_start || !name.chars().all(is_identifier_char) {
            return Err(malformed());
        }

        let (expression, global) = strip_flags(raw_value.trim());
        if expression.is_empty() {
            return Err(malformed());
        }

        let declaration = Self {
            variable: Variable {
                value: name.to_string(),
            },
            value: Value {
                value: resolve_expression(expression, store)?,
            },
            global,
        };

        store.register(declaration.clone());
        Ok(declaration)
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The variable name, without `$`
    pub fn name(&self) -> &str {
        &self.variable.value
    }

    /// The resolved value text
    pub fn value_text(&self) -> &str {
        &self.value.value
    }

    /// True when the declaration carries the `!global` flag
    pub fn is_global(&self) -> bool {
        self.global
    }
}

/// Removes trailing `!default` / `!global` flags, reporting whether `!global` was present
fn strip_flags(mut expression: &str) -> (&str, bool) {
    let mut global = false;

    loop {
        let trimmed = expression.trim_end();
        if let Some(rest) = strip_flag(trimmed, FLAG_GLOBAL) {
            global = true;
            expression = rest;
        } else if let Some(rest) = strip_flag(trimmed, FLAG_DEFAULT) {
            expression = rest;
        } else {
            return (trimmed, global);
        }
    }
}

/// Strips `flag` when it is a separate trailing token
fn strip_flag<'a>(expression: &'a str, flag: &str) -> Option<&'a str> {
    let rest = expression.strip_suffix(flag)?;
    if rest.is_empty() || rest.ends_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Substitutes every variable reference and interpolation in `expression`
fn resolve_expression(
    expression: &str,
    store: &DeclarationStore,
) -> Result<String, DeclarationError> {
    let mut resolved = String::with_capacity(expression.len());
    let mut last = 0;
    let mut search_from = 0;

    while let Some(captures) = REFERENCE_PATTERN.captures_at(expression, search_from) {
        let Some(whole) = captures.get(0) else {
            break;
        };
        let mut end = whole.end();

        if let Some(inner) = captures.name("interpolation") {
            resolved.push_str(&expression[last..whole.start()]);
            resolved.push_str(&resolve_expression(inner.as_str().trim(), store)?);
        } else if let Some(name) = captures.name("name") {
            let mut name = name.as_str();
            if expression[end..].starts_with(VARIABLE_SIGIL) {
                let trimmed = name.trim_end_matches('-');
                end -= name.len() - trimmed.len();
                name = trimmed;
            }
            if name.is_empty() {
                // Only dashes before the next `$`: keep as text
                search_from = end;
                continue;
            }

            resolved.push_str(&expression[last..whole.start()]);
            let declaration = match captures.name("namespace") {
                Some(namespace) => store.resolve_namespaced(namespace.as_str(), name)?,
                None => store.resolve(name)?,
            };
            resolved.push_str(declaration.value_text());
        }

        last = end;
        search_from = end;
    }

    resolved.push_str(&expression[last..]);
    Ok(resolved)
}

#[cfg(test)]
#[path = "declaration_tests.rs"]
mod tests;
