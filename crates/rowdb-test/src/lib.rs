//! # rowdb-test
//!
//! Integration tests for RowDB.
//!
//! This crate contains:
//! - Helpers for driving a [`Session`] and capturing its output
//! - Script file fixtures
//! - End-to-end pipeline tests under `tests/`

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::io::Write;
use std::path::{Path, PathBuf};

use rowdb_core::{Flow, RowDbResult, Session};
use tempfile::TempDir;

/// A session together with everything it has printed.
#[derive(Debug, Default)]
pub struct Harness {
    /// The session under test.
    pub session: Session,
    output: Vec<u8>,
}

impl Harness {
    /// Creates a harness around a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a harness around the given session.
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            output: Vec::new(),
        }
    }

    /// Feeds one line through [`Session::process_line`].
    pub fn line(&mut self, line: &str) -> Flow {
        self.session
            .process_line(line, &mut self.output)
            .expect("writing to a Vec cannot fail")
    }

    /// Feeds lines until one of them returns [`Flow::Exit`].
    pub fn lines(&mut self, lines: &[&str]) -> Flow {
        for line in lines {
            if self.line(line) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    /// Replays a script file, returning the session's result.
    pub fn script(&mut self, path: &Path) -> RowDbResult<Flow> {
        self.session.run_script(path, &mut self.output)
    }

    /// Returns and clears everything printed so far.
    pub fn take_output(&mut self) -> String {
        let bytes = std::mem::take(&mut self.output);
        String::from_utf8(bytes).expect("session output is UTF-8")
    }

    /// Number of rows in the session's store.
    pub fn row_count(&self) -> usize {
        self.session.store().len()
    }
}

/// A temporary directory holding script files.
#[derive(Debug)]
pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    /// Creates an empty script directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Writes a script with one entry per line and returns its path.
    pub fn write(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("Failed to create script");
        for line in lines {
            writeln!(file, "{line}").expect("Failed to write script");
        }
        path
    }

    /// Returns the path a script with this name would have.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for ScriptDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the data lines of a rendered table, without the borders.
pub fn table_rows(output: &str) -> Vec<&str> {
    output.lines().filter(|line| line.starts_with('│')).collect()
}
