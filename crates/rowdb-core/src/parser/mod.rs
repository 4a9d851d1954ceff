//! Line classification and parsing.
//!
//! Every input line is first classified as a directive or a statement, then
//! split into a command name and a comma-separated argument list by
//! [`split_command`]. Keyword-specific validation lives in
//! [`statement`] and [`directive`].

pub mod directive;
pub mod statement;

pub use directive::Directive;
pub use statement::Statement;

/// Marker that starts a control directive.
pub const DIRECTIVE_MARKER: char = '.';

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A control directive such as `.exit`.
    Directive,
    /// A data statement such as `insert 1,a,b`. Empty lines land here too.
    Statement,
}

/// Classifies a raw input line.
pub fn classify(line: &str) -> LineKind {
    if line.trim().starts_with(DIRECTIVE_MARKER) {
        LineKind::Directive
    } else {
        LineKind::Statement
    }
}

/// Splits a line into its command name and trimmed arguments.
///
/// The name is everything up to the first space. The rest of the line is
/// split on commas; a line without a space has no arguments.
pub fn split_command(line: &str) -> (&str, Vec<&str>) {
    let line = line.trim();
    match line.split_once(' ') {
        Some((name, rest)) => (name, rest.split(',').map(str::trim).collect()),
        None => (line, Vec::new()),
    }
}
