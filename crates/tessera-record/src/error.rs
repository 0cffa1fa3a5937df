//! Persistence errors.

use std::io;
use thiserror::Error;

/// Errors reading or writing a [`ResultRecord`](crate::ResultRecord).
///
/// Underlying failures are passed through unchanged.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The file could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The contents are not a valid record.
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
}
