//! Error handling for RowDB.
//!
//! This module provides the structured error type and result alias used
//! across the pipeline.

mod kind;

pub use kind::{ErrorKind, RowDbError};

/// Result type alias for RowDB operations.
pub type RowDbResult<T> = std::result::Result<T, RowDbError>;
