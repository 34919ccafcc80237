//! Attendance types shared by the punchclock engine and its front ends
//!
//! This crate defines:
//! - Attendance entries (minute-precision timestamps)
//! - Recording outcomes returned to the caller
//! - Events broadcast to secondary observers
//! - Versioning of the serialized forms

mod events;
mod types;

pub use events::*;
pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
