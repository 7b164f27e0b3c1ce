//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A line could not be parsed as an entry.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source file.
        line: usize,
        /// Parser message.
        message: String,
    },
    /// An entry could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(String),
    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
