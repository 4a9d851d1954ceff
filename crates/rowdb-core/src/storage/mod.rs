//! In-memory row storage.
//!
//! Rows live in an append-only [`RowStore`] owned by the session. There is
//! no index and nothing is persisted.

mod record;
mod table;

pub use record::Record;
pub use table::RowStore;
