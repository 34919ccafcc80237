//! Shared utilities for punchclock
//!
//! This crate provides:
//! - Wall-clock time with a debug-only mock override
//! - The fixed text format used for attendance timestamps
//! - Default paths for the attendance log and configuration file

mod paths;
mod time;

pub use paths::*;
pub use time::*;
