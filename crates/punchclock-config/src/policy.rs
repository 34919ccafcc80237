//! Validated attendance policy

use crate::schema::RawConfig;
use chrono::Duration;
use punchclock_util::{default_log_path, HourWindow};
use std::path::PathBuf;

pub const DEFAULT_WORKING_HOURS_START: u8 = 9;
pub const DEFAULT_WORKING_HOURS_END: u8 = 18;
pub const DEFAULT_LATENESS_THRESHOLD_HOURS: f64 = 1.0;
pub const DEFAULT_MAX_LATE_ALLOWED_PER_MONTH: u32 = 3;

/// Validated policy ready for use by the attendance engine
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Hours during which entries are accepted
    pub working_hours: HourWindow,

    /// Gap beyond which a new entry counts as late, in hours
    pub lateness_threshold_hours: f64,

    /// Reserved. Parsed and reported, never enforced.
    pub max_late_allowed_per_month: u32,

    /// Attendance log file
    pub log_path: PathBuf,
}

impl Policy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::default();
        let attendance = raw.attendance;

        let start = attendance
            .working_hours_start
            .unwrap_or(DEFAULT_WORKING_HOURS_START);
        let end = attendance
            .working_hours_end
            .unwrap_or(DEFAULT_WORKING_HOURS_END);

        Self {
            working_hours: HourWindow::new(start, end).unwrap_or(defaults.working_hours),
            lateness_threshold_hours: attendance
                .lateness_threshold_hours
                .unwrap_or(defaults.lateness_threshold_hours),
            max_late_allowed_per_month: attendance
                .max_late_allowed_per_month
                .unwrap_or(defaults.max_late_allowed_per_month),
            log_path: attendance.log_path.unwrap_or(defaults.log_path),
        }
    }

    /// Same policy writing to a different log file
    pub fn with_log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }

    /// The lateness threshold as a duration, at millisecond resolution
    pub fn lateness_threshold(&self) -> Duration {
        Duration::milliseconds((self.lateness_threshold_hours * 3_600_000.0).round() as i64)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            working_hours: HourWindow {
                start: DEFAULT_WORKING_HOURS_START,
                end: DEFAULT_WORKING_HOURS_END,
            },
            lateness_threshold_hours: DEFAULT_LATENESS_THRESHOLD_HOURS,
            max_late_allowed_per_month: DEFAULT_MAX_LATE_ALLOWED_PER_MONTH,
            log_path: default_log_path(),
        }
    }
}
