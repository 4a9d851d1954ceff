//! Statement execution against the row store.

use tracing::debug;

use crate::parser::Statement;
use crate::render::render_table;
use crate::storage::RowStore;

/// Message produced by `select` on an empty store.
pub const EMPTY_TABLE_MESSAGE: &str = "Empty table";

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// A record was appended.
    Inserted,
    /// `select` ran against an empty store.
    Empty,
    /// `select` rendered the stored rows.
    Rows(String),
}

impl ExecutionResult {
    /// Returns the text to show for this result, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Inserted => None,
            Self::Empty => Some(EMPTY_TABLE_MESSAGE),
            Self::Rows(table) => Some(table),
        }
    }
}

/// Applies a statement to the store.
///
/// Inserts never fail: ids are not checked for uniqueness.
pub fn execute(statement: Statement, store: &mut RowStore) -> ExecutionResult {
    match statement {
        Statement::Insert(record) => {
            debug!(id = record.id, "inserting record");
            store.insert(record);
            ExecutionResult::Inserted
        }
        Statement::Select if store.is_empty() => ExecutionResult::Empty,
        Statement::Select => ExecutionResult::Rows(render_table(store.rows())),
    }
}
