//! Stylesheet Syntax Constants
//!
//! Markers and delimiters recognised while extracting variable declarations.
//! Centralizing these keeps the line filter, the declaration parser and the
//! use rule parser in agreement.

// Line handling
/// Delimiter used to split source text into lines
pub const LINE_DELIMITER: char = '\n';
/// Prefix of a line comment (e.g., `// note`)
pub const COMMENT_DELIMITER: &str = "//";
/// Lines that count as empty and never reach the declaration parser.
///
/// The last entry is the literal two-character token `\s`, not a whitespace character.
pub const EMPTY_LINES: [&str; 3] = ["", "\n", "\\s"];
/// Statement terminator stripped from the end of a line
pub const STATEMENT_TERMINATOR: char = ';';

// Directives
/// Import directive marker; lines containing it are dropped
pub const IMPORT_DIRECTIVE: &str = "@import";
/// Use directive marker; lines containing it are registered as use rules
pub const USE_DIRECTIVE: &str = "@use";

// Declarations
/// Sigil introducing a variable name (e.g., `$primary`)
pub const VARIABLE_SIGIL: char = '$';
/// Separator between a variable name and its value
pub const DECLARATION_SEPARATOR: char = ':';
/// Flag exporting a variable out of the block it is declared in
pub const FLAG_GLOBAL: &str = "!global";
/// Flag stripped from the value and otherwise ignored; the later declaration still wins
pub const FLAG_DEFAULT: &str = "!default";
/// Opening of an interpolation (e.g., `#{$size}`)
pub const INTERPOLATION_START: &str = "#{";
/// Closing of an interpolation
pub const INTERPOLATION_END: char = '}';
/// Separator between a use rule namespace and a member (e.g., `colors.$primary`)
pub const NAMESPACE_SEPARATOR: char = '.';

// Use rules
/// Keyword introducing a use rule alias (e.g., `@use "colors" as c`)
pub const USE_ALIAS_KEYWORD: &str = "as";
/// Alias merging a module's members without a namespace
pub const USE_ALIAS_WILDCARD: &str = "*";
/// File extensions dropped when deriving a default namespace
pub const STYLESHEET_EXTENSIONS: [&str; 3] = [".scss", ".sass", ".css"];
/// Prefix marking a partial file (e.g., `_colors.scss`)
pub const PARTIAL_PREFIX: char = '_';

/// Returns true for characters allowed to start a variable or namespace identifier
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '_'
}

/// Returns true for characters allowed in a variable or namespace identifier
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
