//! Attendance log record format
//!
//! ```text
//! Date,Time
//! 2025-03-03,09:00
//! 2025-03-03,10:30
//! ```
//!
//! Dates and times use a fixed, locale-independent format.

use chrono::{NaiveDate, NaiveTime};
use punchclock_api::AttendanceEntry;
use punchclock_util::{ENTRY_DATE_FORMAT, ENTRY_TIME_FORMAT};

/// First line of every attendance log
pub const HEADER: &str = "Date,Time";

/// Render an entry as one log line (without the trailing newline)
pub fn format_record(entry: &AttendanceEntry) -> String {
    format!(
        "{},{}",
        entry.date.format(ENTRY_DATE_FORMAT),
        entry.time.format(ENTRY_TIME_FORMAT)
    )
}

/// Parse one log line into an entry
pub fn parse_record(line: &str) -> Result<AttendanceEntry, String> {
    let line = line.trim_end_matches('\r');
    let (date, time) = line
        .split_once(',')
        .ok_or_else(|| "expected two comma-separated fields".to_string())?;

    if time.contains(',') {
        return Err("expected two comma-separated fields".into());
    }

    let date = NaiveDate::parse_from_str(date.trim(), ENTRY_DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}': {}", date.trim(), e))?;
    let time = NaiveTime::parse_from_str(time.trim(), ENTRY_TIME_FORMAT)
        .map_err(|e| format!("invalid time '{}': {}", time.trim(), e))?;

    Ok(AttendanceEntry { date, time })
}

/// Whether a line is the log header
pub fn is_header(line: &str) -> bool {
    line.trim_end_matches('\r').trim() == HEADER
}
