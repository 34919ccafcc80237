//! Attendance engine for punchclock
//!
//! This crate is the heart of punchclock, containing:
//! - Working-hours validation of submitted timestamps
//! - The lateness scan over previously recorded entries
//! - Serialized read-scan-append against the attendance log
//! - Broadcast of outcomes to secondary observers

mod engine;
mod lateness;

pub use engine::*;
pub use lateness::*;

use punchclock_store::StoreError;
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Attendance log error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// True when the log holds a record that cannot be parsed
    pub fn is_parse_error(&self) -> bool {
        match self {
            CoreError::Store(e) => e.is_parse_error(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
