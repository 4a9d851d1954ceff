//! Append-only row store.

use super::Record;

/// Ordered, append-only collection of records.
///
/// Insertion order is preserved and duplicates are kept.
#[derive(Debug, Default)]
pub struct RowStore {
    rows: Vec<Record>,
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn insert(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Returns all rows in insertion order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row was inserted yet.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
