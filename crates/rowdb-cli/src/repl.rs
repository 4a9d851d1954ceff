//! Interactive REPL (Read-Eval-Print-Loop) for RowDB.
//!
//! Lines come from a [`LineSource`]: a rustyline editor with history and
//! completion when stdin is a terminal, or plain buffered reads otherwise.
//! Every line is handed to the session, which writes its output to the
//! REPL's writer.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, EditMode, Editor, Helper};
use tracing::{debug, error, warn};

use rowdb_core::{read_lossy_line, Flow, Session};

use crate::config::CliConfig;

/// Words offered by tab completion.
const COMPLETIONS: [&str; 4] = ["insert", "select", ".exit", ".script"];

/// What a [`LineSource`] produced for one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// A complete input line without its terminator.
    Line(String),
    /// The user pressed Ctrl-C; the pending input was discarded.
    Interrupted,
    /// End of input.
    Eof,
}

/// A source of input lines.
pub trait LineSource {
    /// Reads the next line, showing `prompt` first.
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent>;

    /// Persists history, if the source keeps any.
    fn save_history(&mut self) {}
}

/// REPL helper for rustyline.
struct ReplHelper;

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only the command word is completed.
        let word = &line[..pos];
        if word.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let matches = COMPLETIONS
            .iter()
            .filter(|candidate| candidate.starts_with(word))
            .map(|candidate| Pair {
                display: (*candidate).to_string(),
                replacement: (*candidate).to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

impl Helper for ReplHelper {}

/// Line source backed by a rustyline editor.
pub struct EditorSource {
    /// The rustyline editor.
    editor: Editor<ReplHelper, DefaultHistory>,
    /// History file path.
    history_file: Option<PathBuf>,
}

impl EditorSource {
    /// Creates an editor, loading history if enabled.
    pub fn new(config: &CliConfig) -> Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .max_history_size(config.history_size)?
            .build();

        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(ReplHelper));

        let history_file = config.history_path();
        if let Some(ref path) = history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    warn!("Failed to load history: {}", e);
                }
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::Eof),
            Err(e) => {
                error!("Readline error: {}", e);
                Err(e).context("failed to read input")
            }
        }
    }

    fn save_history(&mut self) {
        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = self.editor.save_history(path) {
                warn!("Failed to save history: {}", e);
            }
        }
    }
}

/// Line source that prints the prompt and reads plain lines.
pub struct PlainSource<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> PlainSource<R, W> {
    /// Creates a source reading from `reader` and prompting on `prompt_out`.
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for PlainSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent> {
        write!(self.prompt_out, "{prompt}")?;
        self.prompt_out.flush()?;

        // Invalid UTF-8 is replaced rather than ending the session.
        let line = read_lossy_line(&mut self.reader).context("failed to read input")?;
        Ok(line.map_or(ReadEvent::Eof, ReadEvent::Line))
    }
}

/// Interactive REPL for RowDB.
pub struct Repl<S> {
    /// The session holding the row store.
    session: Session,
    /// Where input lines come from.
    source: S,
    /// Prompt shown before each read.
    prompt: String,
}

impl<S: LineSource> Repl<S> {
    /// Creates a new REPL instance.
    pub fn new(session: Session, source: S, config: &CliConfig) -> Self {
        Self {
            session,
            source,
            prompt: config.prompt.clone(),
        }
    }

    /// Prints the welcome banner.
    pub fn print_banner<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "RowDB v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Enter \".exit\" to quit, \".script FILE\" to run a file.")?;
        Ok(())
    }

    /// Runs the main REPL loop until `.exit` or end of input.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Flow> {
        let result = self.read_eval_loop(out);
        self.source.save_history();
        result
    }

    fn read_eval_loop<W: Write>(&mut self, out: &mut W) -> Result<Flow> {
        loop {
            let line = match self.source.read_line(&self.prompt)? {
                ReadEvent::Line(line) => line,
                ReadEvent::Interrupted => {
                    writeln!(out, "^C")?;
                    out.flush()?;
                    continue;
                }
                ReadEvent::Eof => break,
            };

            let flow = self.session.process_line(&line, out)?;
            out.flush()?;

            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }

        debug!("end of input");
        Ok(Flow::Continue)
    }

    #[cfg(test)]
    fn session(&self) -> &Session {
        &self.session
    }
}
