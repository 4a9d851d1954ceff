//! Control directive parsing.

use std::path::PathBuf;

use crate::error::{RowDbError, RowDbResult};

use super::split_command;

/// A parsed control directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `.exit`: end the session.
    Exit,
    /// `.script <path>`: replay a file through the pipeline.
    Script(PathBuf),
}

impl Directive {
    /// Parses a line classified as a directive.
    pub fn parse(line: &str) -> RowDbResult<Self> {
        let (name, args) = split_command(line);

        match name {
            ".exit" => {
                expect_args(name, &args, 0)?;
                Ok(Self::Exit)
            }
            ".script" => {
                expect_args(name, &args, 1)?;
                Ok(Self::Script(PathBuf::from(args[0])))
            }
            _ => Err(RowDbError::unrecognized_directive(format!(
                "unrecognized command `{name}`"
            ))),
        }
    }
}

fn expect_args(name: &str, args: &[&str], expected: usize) -> RowDbResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RowDbError::directive_argument(format!(
            "`{name}` expects {expected} argument(s), got {}",
            args.len()
        )))
    }
}
