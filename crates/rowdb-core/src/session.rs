//! Line processing for one session.
//!
//! A [`Session`] owns the row store and drives every line through the same
//! pipeline: classify, then either run a directive or parse and execute a
//! statement. Text produced along the way goes to a caller-supplied writer.
//!
//! Errors are handled differently depending on where they happen:
//!
//! - At the top level every recoverable error is printed and the session
//!   continues.
//! - Inside a script a statement error is printed and replay continues, but
//!   a directive error aborts the script and is returned to the caller,
//!   annotated with the offending line.
//! - Output errors are never recovered.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ErrorKind, RowDbError, RowDbResult};
use crate::executor::{execute, ExecutionResult, EMPTY_TABLE_MESSAGE};
use crate::parser::{classify, Directive, LineKind, Statement};
use crate::storage::RowStore;

/// Line printed by `.exit`.
pub const FAREWELL_MESSAGE: &str = "bye.";

/// Default limit for nested `.script` directives.
pub const DEFAULT_MAX_SCRIPT_DEPTH: usize = 16;

/// What the caller should do after a line was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// `.exit` was processed; stop reading input.
    Exit,
}

/// Tunable session behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// How many `.script` directives may be nested inside each other.
    pub max_script_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_script_depth: DEFAULT_MAX_SCRIPT_DEPTH,
        }
    }
}

/// An interactive session with its own row store.
#[derive(Debug, Default)]
pub struct Session {
    store: RowStore,
    options: SessionOptions,
    /// Number of scripts currently being replayed.
    depth: usize,
}

impl Session {
    /// Creates a session with an empty store and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given options.
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the row store.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Returns the session options.
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Processes one line of input.
    ///
    /// Recoverable errors are written to `out` as `Error: ...` and the
    /// session continues. Only output failures are returned.
    pub fn process_line<W: Write + ?Sized>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> RowDbResult<Flow> {
        match self.dispatch(line, out) {
            Err(err) if err.kind().is_recoverable() => {
                report(out, &err)?;
                Ok(Flow::Continue)
            }
            result => result,
        }
    }

    /// Processes one line of input, returning any error to the caller.
    pub fn dispatch<W: Write + ?Sized>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> RowDbResult<Flow> {
        let kind = classify(line);
        debug!(?kind, line, "processing line");

        match kind {
            LineKind::Directive => self.run_directive(line, out),
            LineKind::Statement => {
                self.run_statement(line, out)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Replays a script file through the pipeline.
    ///
    /// Returns [`Flow::Exit`] if the script, or a script it includes, ran
    /// `.exit`.
    pub fn run_script<W: Write + ?Sized>(
        &mut self,
        path: &Path,
        out: &mut W,
    ) -> RowDbResult<Flow> {
        if self.depth >= self.options.max_script_depth {
            return Err(RowDbError::script_io(
                format!(
                    "cannot run `{}`: scripts nested deeper than {} levels",
                    path.display(),
                    self.options.max_script_depth
                ),
                None,
            ));
        }

        let file = File::open(path).map_err(|e| {
            RowDbError::script_io(format!("cannot open `{}`: {e}", path.display()), Some(e))
        })?;
        debug!(path = %path.display(), depth = self.depth, "running script");

        self.depth += 1;
        let result = self.replay(BufReader::new(file), path, out);
        self.depth -= 1;

        debug!(path = %path.display(), ok = result.is_ok(), "script finished");
        result
    }

    fn replay<R: BufRead, W: Write + ?Sized>(
        &mut self,
        mut reader: R,
        path: &Path,
        out: &mut W,
    ) -> RowDbResult<Flow> {
        let mut number: usize = 0;
        while let Some(line) = read_lossy_line(&mut reader).map_err(|e| {
            RowDbError::script_io(
                format!("cannot read `{}` line {}: {e}", path.display(), number + 1),
                Some(e),
            )
        })? {
            number += 1;

            match classify(&line) {
                LineKind::Directive => match self.run_directive(&line, out) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => return Ok(Flow::Exit),
                    Err(err) if err.kind() == ErrorKind::Output => return Err(err),
                    Err(err) => {
                        warn!(path = %path.display(), line = number, "script aborted");
                        return Err(err.in_script_line(&line));
                    }
                },
                LineKind::Statement => match self.run_statement(&line, out) {
                    Ok(()) => {}
                    Err(err) if err.kind().is_recoverable() => report(out, &err)?,
                    Err(err) => return Err(err),
                },
            }
        }

        Ok(Flow::Continue)
    }

    fn run_directive<W: Write + ?Sized>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> RowDbResult<Flow> {
        match Directive::parse(line)? {
            Directive::Exit => {
                emit(out, FAREWELL_MESSAGE)?;
                Ok(Flow::Exit)
            }
            Directive::Script(path) => self.run_script(&path, out),
        }
    }

    fn run_statement<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> RowDbResult<()> {
        let statement = Statement::parse(line)?;

        match execute(statement, &mut self.store) {
            ExecutionResult::Inserted => Ok(()),
            ExecutionResult::Empty => emit(out, EMPTY_TABLE_MESSAGE),
            ExecutionResult::Rows(table) => out
                .write_all(table.as_bytes())
                .map_err(RowDbError::output),
        }
    }
}

/// Reads one line, replacing invalid UTF-8 with `U+FFFD`.
///
/// The trailing `\n` or `\r\n` is stripped. Returns `Ok(None)` at end of
/// input.
pub fn read_lossy_line<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn emit<W: Write + ?Sized>(out: &mut W, text: impl Display) -> RowDbResult<()> {
    writeln!(out, "{text}").map_err(RowDbError::output)
}

fn report<W: Write + ?Sized>(out: &mut W, err: &RowDbError) -> RowDbResult<()> {
    emit(out, format_args!("Error: {err}"))
}
