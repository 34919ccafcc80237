//! Time utilities for punchclock
//!
//! Attendance timestamps are naive local wall-clock values with minute
//! precision. This module owns the fixed text formats used both on the
//! command line and in the persisted log, plus the working-hours window.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `PUNCHCLOCK_MOCK_TIME` environment variable can be set
//! to override the system time used when no explicit timestamp is given.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! PUNCHCLOCK_MOCK_TIME="2025-12-22 10:30:00" punchclock record
//! ```

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "PUNCHCLOCK_MOCK_TIME";

/// Date column format of the attendance log
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Time column format of the attendance log
pub const ENTRY_TIME_FORMAT: &str = "%H:%M";

/// Format accepted for timestamps typed by the user
pub const ENTRY_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match NaiveDateTime::parse_from_str(&mock_time_str, MOCK_TIME_FORMAT) {
                    Ok(naive_dt) => match Local.from_local_datetime(&naive_dt).single() {
                        Some(mock_dt) => {
                            let offset = mock_dt.signed_duration_since(chrono::Local::now());
                            tracing::info!(
                                mock_time = %mock_time_str,
                                offset_secs = offset.num_seconds(),
                                "Mock time enabled"
                            );
                            return Some(offset);
                        }
                        None => tracing::warn!(
                            mock_time = %mock_time_str,
                            "Failed to convert mock time to local timezone"
                        ),
                    },
                    Err(_) => tracing::warn!(
                        mock_time = %mock_time_str,
                        expected_format = MOCK_TIME_FORMAT,
                        "Invalid mock time format"
                    ),
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Error parsing a user-supplied or persisted timestamp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid timestamp '{value}': expected {expected}")]
pub struct TimestampParseError {
    pub value: String,
    pub expected: &'static str,
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Parse a `YYYY-MM-DD HH:MM` timestamp as typed on the command line.
pub fn parse_entry_input(s: &str) -> Result<NaiveDateTime, TimestampParseError> {
    NaiveDateTime::parse_from_str(s.trim(), ENTRY_INPUT_FORMAT).map_err(|_| TimestampParseError {
        value: s.to_string(),
        expected: "YYYY-MM-DD HH:MM",
    })
}

/// Format a timestamp the way it is shown to the user.
pub fn format_entry_time(dt: &NaiveDateTime) -> String {
    dt.format(ENTRY_INPUT_FORMAT).to_string()
}

/// Half-open `[start, end)` range of hours during which entries are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub start: u8,
    pub end: u8,
}

impl HourWindow {
    /// Returns `None` unless `start < end <= 24`.
    pub fn new(start: u8, end: u8) -> Option<Self> {
        if start < end && end <= 24 {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Check if the hour of the given timestamp falls within the window
    pub fn contains(&self, dt: &NaiveDateTime) -> bool {
        let hour = dt.hour();
        hour >= self.start as u32 && hour < self.end as u32
    }
}

impl std::fmt::Display for HourWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
