//! RowDB Command-Line Interface
//!
//! An interactive front end for the RowDB in-memory row store.
//!
//! # Usage
//!
//! ```bash
//! # Start interactive REPL
//! rowdb
//!
//! # Execute single lines
//! rowdb -c "insert 1,alice,alice@example.com" -c select
//!
//! # Replay a script file
//! rowdb -f seed.txt
//! ```

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod repl;

use config::CliConfig;
use repl::{EditorSource, LineSource, PlainSource, Repl};
use rowdb_core::{Flow, Session};

/// RowDB command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "rowdb",
    author = "RowDB Team",
    version,
    about = "Interactive command processor for the RowDB in-memory row store",
    long_about = "Reads `insert <id>,<username>,<email>` and `select` statements plus\n\
                  `.exit` and `.script <file>` directives, interactively or in batch."
)]
struct Args {
    /// Replay a script file, then exit
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Process a single line, then exit (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Suppress the banner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE", env = "ROWDB_CONFIG")]
    config: Option<PathBuf>,

    /// Do not load or save line-editing history
    #[arg(long)]
    no_history: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(args.verbose);

    let config = load_config(&args)?;
    let session = Session::with_options(config.session_options());
    let mut out = io::stdout();

    if !args.commands.is_empty() || args.file.is_some() {
        let completed = run_batch(session, &args.commands, args.file.as_deref(), &mut out)?;
        return Ok(if completed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if io::stdin().is_terminal() {
        let source = EditorSource::new(&config)?;
        run_repl(session, source, &config, !args.quiet, &mut out)
    } else {
        let source = PlainSource::new(io::stdin().lock(), io::stdout());
        run_repl(session, source, &config, false, &mut out)
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "rowdb_cli=debug,rowdb_core=debug"
    } else {
        "rowdb_cli=warn,rowdb_core=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(args: &Args) -> Result<CliConfig> {
    let mut config = if let Some(path) = &args.config {
        CliConfig::from_file(path)?
    } else {
        CliConfig::load_default()?
    };

    if args.no_history {
        config.history = false;
    }

    Ok(config)
}

/// Runs `-c` lines, then the `-f` script, stopping at `.exit`.
///
/// Returns `false` if the script was aborted by a directive error.
fn run_batch<W: Write>(
    mut session: Session,
    commands: &[String],
    file: Option<&Path>,
    out: &mut W,
) -> Result<bool> {
    for line in commands {
        info!("Executing command: {}", line);
        if session.process_line(line, out)? == Flow::Exit {
            return Ok(true);
        }
    }

    if let Some(path) = file {
        info!("Executing file: {}", path.display());
        match session.run_script(path, out) {
            Ok(_) => {}
            Err(e) if e.kind().is_recoverable() => {
                warn!("Script {} aborted", path.display());
                writeln!(out, "Error: {e}")?;
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }
    }

    out.flush()?;
    Ok(true)
}

fn run_repl<S: LineSource, W: Write>(
    session: Session,
    source: S,
    config: &CliConfig,
    banner: bool,
    out: &mut W,
) -> Result<ExitCode> {
    let mut repl = Repl::new(session, source, config);

    if banner {
        repl.print_banner(out)?;
    }

    repl.run(out)?;
    Ok(ExitCode::SUCCESS)
}
