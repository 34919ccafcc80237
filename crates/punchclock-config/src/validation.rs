//! Configuration validation

use crate::schema::{RawAttendanceConfig, RawConfig};
use crate::policy::{DEFAULT_WORKING_HOURS_END, DEFAULT_WORKING_HOURS_START};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("working_hours_start ({start}) must be earlier than working_hours_end ({end})")]
    EmptyWorkingHours { start: u8, end: u8 },

    #[error("working_hours_end ({0}) must be at most 24")]
    WorkingHoursEndOutOfRange(u8),

    #[error("lateness_threshold_hours ({0}) must be a positive number")]
    InvalidLatenessThreshold(f64),

    #[error("log_path cannot be empty")]
    EmptyLogPath,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    validate_attendance(&config.attendance)
}

fn validate_attendance(raw: &RawAttendanceConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let start = raw.working_hours_start.unwrap_or(DEFAULT_WORKING_HOURS_START);
    let end = raw.working_hours_end.unwrap_or(DEFAULT_WORKING_HOURS_END);

    if end > 24 {
        errors.push(ValidationError::WorkingHoursEndOutOfRange(end));
    }
    if start >= end {
        errors.push(ValidationError::EmptyWorkingHours { start, end });
    }

    if let Some(hours) = raw.lateness_threshold_hours
        && !(hours.is_finite() && hours > 0.0)
    {
        errors.push(ValidationError::InvalidLatenessThreshold(hours));
    }

    if let Some(path) = &raw.log_path
        && path.as_os_str().is_empty()
    {
        errors.push(ValidationError::EmptyLogPath);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(attendance: RawAttendanceConfig) -> RawConfig {
        RawConfig {
            config_version: 1,
            attendance,
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&config(Default::default())).is_empty());
    }

    #[test]
    fn inverted_working_hours() {
        let errors = validate_config(&config(RawAttendanceConfig {
            working_hours_start: Some(18),
            working_hours_end: Some(9),
            ..Default::default()
        }));
        assert_eq!(
            errors,
            vec![ValidationError::EmptyWorkingHours { start: 18, end: 9 }]
        );
    }

    #[test]
    fn start_checked_against_default_end() {
        let errors = validate_config(&config(RawAttendanceConfig {
            working_hours_start: Some(20),
            ..Default::default()
        }));
        assert_eq!(
            errors,
            vec![ValidationError::EmptyWorkingHours { start: 20, end: 18 }]
        );
    }

    #[test]
    fn end_past_midnight() {
        let errors = validate_config(&config(RawAttendanceConfig {
            working_hours_end: Some(25),
            ..Default::default()
        }));
        assert_eq!(errors, vec![ValidationError::WorkingHoursEndOutOfRange(25)]);
    }

    #[test]
    fn threshold_must_be_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let errors = validate_config(&config(RawAttendanceConfig {
                lateness_threshold_hours: Some(bad),
                ..Default::default()
            }));
            assert_eq!(errors.len(), 1, "threshold {} should be rejected", bad);
            assert!(matches!(errors[0], ValidationError::InvalidLatenessThreshold(_)));
        }
    }

    #[test]
    fn collects_every_error() {
        let errors = validate_config(&config(RawAttendanceConfig {
            working_hours_start: Some(10),
            working_hours_end: Some(10),
            lateness_threshold_hours: Some(0.0),
            log_path: Some(PathBuf::new()),
            ..Default::default()
        }));
        assert_eq!(errors.len(), 3);
    }
}
