//! Line level helpers shared by the processor
//!
//! Normalization trims a raw source line; the filters decide which normalized
//! lines reach the declaration parser and which are use rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::vars::constants::*;

static USE_RULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@use .+").expect("use rule pattern is valid"));

/// Strips trailing statement terminators, line terminator remnants and surrounding whitespace
pub fn normalize_line(line: &str) -> &str {
    line.trim_end_matches(|c: char| c == STATEMENT_TERMINATOR || c.is_whitespace())
        .trim_start()
}

/// Returns true when a normalized line should be parsed as a declaration.
///
/// Empty lines, `//` comments and lines mentioning `@import` or `@use` are dropped.
/// The empty check compares against the literal `\s` token, so it only catches
/// exactly blank or newline-only lines.
pub fn is_declaration_line(line: &str) -> bool {
    !EMPTY_LINES.contains(&line)
        && !line.starts_with(COMMENT_DELIMITER)
        && !line.contains(IMPORT_DIRECTIVE)
        && !line.contains(USE_DIRECTIVE)
}

/// Returns true when a normalized line is a `@use <target>` rule
pub fn is_use_rule(line: &str) -> bool {
    USE_RULE_PATTERN.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_terminators() {
        assert_eq!(normalize_line("$a: 1;"), "$a: 1");
        assert_eq!(normalize_line("  $a: 1;;  \r"), "$a: 1");
        assert_eq!(normalize_line("$a: 1; \n"), "$a: 1");
        assert_eq!(normalize_line(""), "");
        assert_eq!(normalize_line("   "), "");
    }

    #[test]
    fn test_normalize_keeps_inner_semicolons() {
        assert_eq!(
            normalize_line("$icon: url(data:image/png;base64,AAA);"),
            "$icon: url(data:image/png;base64,AAA)"
        );
    }

    #[test]
    fn test_filter_drops_noise() {
        assert!(!is_declaration_line(""));
        assert!(!is_declaration_line("\n"));
        assert!(!is_declaration_line("// comment"));
        assert!(!is_declaration_line("@import \"foo\""));
        assert!(!is_declaration_line("@use \"colors\""));
        assert!(is_declaration_line("$a: 1"));
    }

    #[test]
    fn test_filter_empty_check_matches_literal_escape_token() {
        // Only the two-character `\s` token is treated as empty, not real whitespace
        assert!(!is_declaration_line("\\s"));
        assert!(is_declaration_line(" "));
        assert!(is_declaration_line("\t"));
    }

    #[test]
    fn test_filter_comment_must_start_line() {
        assert!(is_declaration_line("$url: http://example.com"));
    }

    #[test]
    fn test_use_rule_detection() {
        assert!(is_use_rule("@use \"colors\""));
        assert!(is_use_rule("@use 'sass:math' as m"));
        assert!(!is_use_rule("@use"));
        assert!(!is_use_rule("  @use \"colors\""));
        assert!(!is_use_rule("@import \"colors\""));
    }
}
