//! Scope block extraction
//!
//! Isolates the body of the first brace block introduced by a named scope
//! (e.g., `%exports { ... }`). Braces are not balanced: the block ends at the
//! first `}` after its opening brace, so nested blocks truncate it.
//!
//! The returned body drops the character right before the closing brace,
//! which for well formed sources is the newline preceding `}`.

use std::ops::Range;

use log::debug;
use regex::Regex;

/// Locates the body of the first block introduced by `scope`.
///
/// Returns the byte range `[open + 1, close - 1)` where `open` is the first `{`
/// at or after the scope match and `close` the first `}` after it. Returns
/// `None` when the scope or either brace is missing.
pub fn scope_range(text: &str, scope: &str) -> Option<Range<usize>> {
    let pattern = Regex::new(&format!(r"{}.*\{{", regex::escape(scope))).ok()?;
    let scope_match = pattern.find(text)?;

    let open = scope_match.start() + text[scope_match.start()..].find('{')?;
    let close = open + 1 + text[open + 1..].find('}')?;

    let start = open + 1;
    // Step back a whole character so the slice stays on a UTF-8 boundary
    let end = text[start..close]
        .char_indices()
        .last()
        .map(|(offset, _)| start + offset)
        .unwrap_or(start);

    Some(start..end)
}

/// Returns the body of the scope block, or the whole text when there is none
pub fn extract_scope<'a>(text: &'a str, scope: &str) -> &'a str {
    match scope_range(text, scope) {
        Some(range) => &text[range],
        None => {
            debug!("Scope '{}' not found, using the whole source", scope);
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_without_match_is_noop() {
        let text = "$a: 1;\n$b: 2;\n";
        assert_eq!(extract_scope(text, "%exports"), text);
        assert_eq!(scope_range(text, "%exports"), None);
    }

    #[test]
    fn test_extract_drops_braces_and_trailing_character() {
        let text = "$outer: 0;\n%exports {\n  $a: 1;\n}\n$after: 2;";
        assert_eq!(extract_scope(text, "%exports"), "\n  $a: 1;");
    }

    #[test]
    fn test_extract_single_line_block() {
        let text = "theme { $a: 1; }";
        assert_eq!(extract_scope(text, "theme"), " $a: 1;");
    }

    #[test]
    fn test_extract_uses_first_matching_block() {
        let text = "theme {\n$a: 1;\n}\ntheme {\n$b: 2;\n}";
        assert_eq!(extract_scope(text, "theme"), "\n$a: 1;");
    }

    #[test]
    fn test_extract_truncates_at_first_inner_closing_brace() {
        let text = "theme {\n$a: 1;\n.inner {\n$b: 2;\n}\n$c: 3;\n}";
        assert_eq!(extract_scope(text, "theme"), "\n$a: 1;\n.inner {\n$b: 2;");
    }

    #[test]
    fn test_extract_escapes_scope_name() {
        let text = "%scss.exports {\n$a: 1;\n}";
        assert_eq!(extract_scope(text, "%scss.exports"), "\n$a: 1;");
        // `.` in the scope name must not act as a wildcard
        assert_eq!(extract_scope(text, "%scssXexports"), text);
    }

    #[test]
    fn test_extract_requires_brace_on_scope_line() {
        let text = "theme\n{\n$a: 1;\n}";
        assert_eq!(extract_scope(text, "theme"), text);
    }

    #[test]
    fn test_extract_without_closing_brace_is_noop() {
        let text = "theme {\n$a: 1;\n";
        assert_eq!(extract_scope(text, "theme"), text);
    }

    #[test]
    fn test_extract_empty_block() {
        assert_eq!(extract_scope("theme {}", "theme"), "");
        assert_eq!(extract_scope("theme {x}", "theme"), "");
    }

    #[test]
    fn test_extract_multibyte_before_closing_brace() {
        let text = "theme {\n$arrow: \"→\"→}";
        assert_eq!(extract_scope(text, "theme"), "\n$arrow: \"→\"");
    }
}
