//! # rowdb-core
//!
//! Statement processing pipeline for RowDB, a tiny in-memory row store.
//!
//! Every input line goes through the same steps:
//!
//! - **Classification**: lines starting with `.` are directives, everything
//!   else is a statement ([`parser::classify`])
//! - **Parsing**: `insert <id>,<username>,<email>` and `select`
//!   ([`Statement`]), `.exit` and `.script <path>` ([`Directive`])
//! - **Execution**: inserts append to the [`RowStore`], selects render it
//! - **Rendering**: an aligned, box-drawn table ([`render_table`])
//!
//! [`Session`] ties the steps together and owns the store.
//!
//! ## Example
//!
//! ```rust
//! use rowdb_core::{Flow, Session};
//!
//! let mut session = Session::new();
//! let mut out: Vec<u8> = Vec::new();
//!
//! session.process_line("insert 1,alice,alice@example.com", &mut out).unwrap();
//! session.process_line("select", &mut out).unwrap();
//! assert_eq!(session.process_line(".exit", &mut out).unwrap(), Flow::Exit);
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("alice@example.com"));
//! assert!(text.ends_with("bye.\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types
pub mod error;

/// Statement execution
pub mod executor;

/// Line classification and parsing
pub mod parser;

/// Table rendering
pub mod render;

/// Session state and line processing
pub mod session;

/// In-memory row storage
pub mod storage;

pub use error::{ErrorKind, RowDbError, RowDbResult};
pub use executor::{execute, ExecutionResult};
pub use parser::{Directive, Statement};
pub use render::render_table;
pub use session::{read_lossy_line, Flow, Session, SessionOptions};
pub use storage::{Record, RowStore};
