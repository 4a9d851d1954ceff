//! Box-drawn table rendering.
//!
//! Layout for the minimum column widths:
//!
//! ```text
//! ┌ id ┬ username ┬ email ┐
//! │  1 │ alice    │ a@x   │
//! └────┴──────────┴───────┘
//! ```
//!
//! Columns grow to fit their longest value. Text widths are counted in
//! characters, not bytes.

use std::fmt::Write as _;

use crate::storage::Record;

const ID_HEADER: &str = "id";
const USERNAME_HEADER: &str = "username";
const EMAIL_HEADER: &str = "email";

/// Computed widths of the three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    /// Width of the id column.
    pub id: usize,
    /// Width of the username column.
    pub username: usize,
    /// Width of the email column.
    pub email: usize,
}

impl ColumnWidths {
    /// Computes the widths needed to fit every record and the headers.
    pub fn fit(records: &[Record]) -> Self {
        records.iter().fold(Self::minimum(), |widths, record| Self {
            id: widths.id.max(digit_count(record.id)),
            username: widths.username.max(record.username.chars().count()),
            email: widths.email.max(record.email.chars().count()),
        })
    }

    fn minimum() -> Self {
        Self {
            id: ID_HEADER.len(),
            username: USERNAME_HEADER.len(),
            email: EMAIL_HEADER.len(),
        }
    }
}

fn digit_count(id: u32) -> usize {
    id.checked_ilog10().map_or(1, |log| log as usize + 1)
}

fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Renders records as a table, one line per row plus the two borders.
pub fn render_table(records: &[Record]) -> String {
    let w = ColumnWidths::fit(records);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "┌{} {ID_HEADER} ┬ {USERNAME_HEADER} {}┬ {EMAIL_HEADER} {}┐",
        rule(w.id - ID_HEADER.len()),
        rule(w.username - USERNAME_HEADER.len()),
        rule(w.email - EMAIL_HEADER.len()),
    );

    for record in records {
        let _ = writeln!(
            out,
            "│ {:>id$} │ {:<username$} │ {:<email$} │",
            record.id,
            record.username,
            record.email,
            id = w.id,
            username = w.username,
            email = w.email,
        );
    }

    let _ = writeln!(
        out,
        "└─{}─┴─{}─┴─{}─┘",
        rule(w.id),
        rule(w.username),
        rule(w.email)
    );

    out
}
