//! Session error types.
//!
//! Every failure the pipeline can report carries an [`ErrorKind`] so callers
//! can branch on the category without comparing message strings.

use std::fmt;
use thiserror::Error;

/// Categories of session errors.
///
/// The display form is a stable upper-case tag that is printed in front of
/// every reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Directive name is not one of the known directives.
    UnrecognizedDirective,
    /// A known directive received the wrong number of arguments.
    DirectiveArgument,
    /// Statement keyword is neither `insert` nor `select`.
    UnrecognizedStatement,
    /// Wrong field count, bad id, or a fully-empty record for `insert`.
    StatementArgument,
    /// A script file could not be opened or read.
    ScriptIo,
    /// The session output sink failed.
    Output,
}

impl ErrorKind {
    /// Returns the stable tag used when printing the error.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnrecognizedDirective => "UNRECOGNIZED_META_COMMAND",
            Self::DirectiveArgument => "META_COMMAND_ARGUMENTS_PARSE_ERROR",
            Self::UnrecognizedStatement => "UNRECOGNIZED_STATEMENT",
            Self::StatementArgument => "COMMAND_ARGUMENTS_PARSE_ERROR",
            Self::ScriptIo => "SCRIPT_IO_ERROR",
            Self::Output => "OUTPUT_ERROR",
        }
    }

    /// Returns true if the session can keep running after this error.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::Output)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type for RowDB sessions.
///
/// # Example
///
/// ```rust
/// use rowdb_core::error::{ErrorKind, RowDbError};
///
/// let err = RowDbError::unrecognized_statement("unknown keyword `update`");
/// assert_eq!(err.kind(), ErrorKind::UnrecognizedStatement);
/// assert_eq!(
///     err.to_string(),
///     "UNRECOGNIZED_STATEMENT: unknown keyword `update`"
/// );
/// ```
#[derive(Debug, Error)]
#[error("{kind}: {detail}")]
pub struct RowDbError {
    kind: ErrorKind,
    detail: String,
    #[source]
    source: Option<std::io::Error>,
}

impl RowDbError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            source: None,
        }
    }

    /// Creates an unrecognized directive error.
    #[must_use]
    pub fn unrecognized_directive(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedDirective, detail)
    }

    /// Creates a directive argument error.
    #[must_use]
    pub fn directive_argument(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::DirectiveArgument, detail)
    }

    /// Creates an unrecognized statement error.
    #[must_use]
    pub fn unrecognized_statement(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedStatement, detail)
    }

    /// Creates a statement argument error.
    #[must_use]
    pub fn statement_argument(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::StatementArgument, detail)
    }

    /// Creates a script I/O error, optionally wrapping the OS error.
    #[must_use]
    pub fn script_io(detail: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self {
            kind: ErrorKind::ScriptIo,
            detail: detail.into(),
            source,
        }
    }

    /// Creates an output error from a failed write.
    #[must_use]
    pub fn output(source: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Output,
            detail: source.to_string(),
            source: Some(source),
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Annotates the error with the script line that caused it.
    #[must_use]
    pub fn in_script_line(mut self, line: &str) -> Self {
        self.detail = format!("error parsing command `{line}`: {}", self.detail);
        self
    }
}
