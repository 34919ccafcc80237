//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Attendance rules and log location
    #[serde(default)]
    pub attendance: RawAttendanceConfig,
}

/// Attendance settings; every field falls back to a built-in default
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawAttendanceConfig {
    /// First hour (inclusive) at which entries are accepted
    pub working_hours_start: Option<u8>,

    /// Hour (exclusive) after which entries are refused
    pub working_hours_end: Option<u8>,

    /// Gap in hours beyond which a new entry is late
    pub lateness_threshold_hours: Option<f64>,

    /// Reserved: monthly lateness allowance, not enforced
    pub max_late_allowed_per_month: Option<u32>,

    /// Attendance log file
    pub log_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_attendance_table() {
        let toml_str = r#"
            config_version = 1

            [attendance]
            working_hours_start = 8
            working_hours_end = 17
            lateness_threshold_hours = 0.5
            max_late_allowed_per_month = 2
            log_path = "/var/lib/punchclock/log.txt"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.attendance.working_hours_start, Some(8));
        assert_eq!(config.attendance.working_hours_end, Some(17));
        assert_eq!(config.attendance.lateness_threshold_hours, Some(0.5));
        assert_eq!(config.attendance.max_late_allowed_per_month, Some(2));
        assert_eq!(
            config.attendance.log_path,
            Some(PathBuf::from("/var/lib/punchclock/log.txt"))
        );
    }

    #[test]
    fn attendance_table_is_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.attendance.working_hours_start.is_none());
        assert!(config.attendance.log_path.is_none());
    }

    #[test]
    fn unknown_option_is_rejected() {
        let toml_str = r#"
            config_version = 1

            [attendance]
            working_hours_begin = 8
        "#;

        assert!(toml::from_str::<RawConfig>(toml_str).is_err());
    }
}
