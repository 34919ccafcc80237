//! Shared types for the punchclock API

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use punchclock_util::{format_entry_time, truncate_to_minute};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown when an entry falls outside working hours
pub const OUTSIDE_WORKING_HOURS_MESSAGE: &str =
    "Sorry, you cannot log attendance outside working hours.";

/// Message shown when an entry is accepted and on time
pub const RECORDED_MESSAGE: &str = "Attendance recorded successfully!";

/// Message shown (and broadcast) when an entry is flagged late
pub const LATE_ARRIVAL_MESSAGE: &str = "You are late! Casual leave will be deducted.";

/// One recorded attendance timestamp, at minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl AttendanceEntry {
    /// Build an entry from a full timestamp, dropping seconds.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        let dt = truncate_to_minute(dt);
        Self {
            date: dt.date(),
            time: dt.time(),
        }
    }

    /// Build an entry from its parts. Returns `None` for an invalid time of day.
    pub fn new(date: NaiveDate, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { date, time })
    }

    /// The combined point in time
    pub fn at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

impl From<NaiveDateTime> for AttendanceEntry {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Display for AttendanceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_entry_time(&self.at()))
    }
}

/// Why an entry was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Entry hour falls outside `[start, end)`
    OutsideWorkingHours { hour: u32, start: u8, end: u8 },
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::OutsideWorkingHours { .. } => OUTSIDE_WORKING_HOURS_MESSAGE,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::OutsideWorkingHours { hour, start, end } => write!(
                f,
                "outside working hours (hour {} not in {:02}:00-{:02}:00)",
                hour, start, end
            ),
        }
    }
}

/// Details of a late arrival
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateArrival {
    /// User-facing notice
    pub message: String,
    /// The prior entry whose gap exceeded the threshold
    pub previous: AttendanceEntry,
    /// Gap between the prior entry and the new one, in whole minutes
    pub gap_minutes: i64,
}

/// Result of a single `record` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordingOutcome {
    /// Not accepted; the log was not touched
    Rejected { reason: RejectionReason },
    /// Accepted and appended, not late
    RecordedOnTime,
    /// Accepted and appended, flagged late
    RecordedLate(LateArrival),
}

impl RecordingOutcome {
    pub fn is_recorded(&self) -> bool {
        !matches!(self, RecordingOutcome::Rejected { .. })
    }

    pub fn is_late(&self) -> bool {
        matches!(self, RecordingOutcome::RecordedLate(_))
    }

    /// The notification text the user should see
    pub fn message(&self) -> &str {
        match self {
            RecordingOutcome::Rejected { reason } => reason.message(),
            RecordingOutcome::RecordedOnTime => RECORDED_MESSAGE,
            RecordingOutcome::RecordedLate(late) => &late.message,
        }
    }
}
