//! Persistence layer for punchclock
//!
//! Provides:
//! - The attendance log record format (`Date,Time` header, one entry per line)
//! - A file-backed append-only store
//! - An in-memory store for tests

mod codec;
mod memory;
mod text_log;
mod traits;

pub use codec::*;
pub use memory::*;
pub use text_log::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record on line {line} ({content:?}): {message}")]
    Parse {
        line: usize,
        content: String,
        message: String,
    },

    #[error("Log does not start with the 'Date,Time' header (found {found:?})")]
    MissingHeader { found: String },
}

impl StoreError {
    /// True for corrupt log content, as opposed to I/O failures
    pub fn is_parse_error(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::MissingHeader { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
