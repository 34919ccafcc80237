//! Default paths for punchclock
//!
//! Paths are user-writable by default:
//! - Data: `$XDG_DATA_HOME/punchclock` or `~/.local/share/punchclock`
//! - Config: `$XDG_CONFIG_HOME/punchclock/config.toml` or `~/.config/punchclock/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const PUNCHCLOCK_DATA_DIR_ENV: &str = "PUNCHCLOCK_DATA_DIR";

/// Environment variable for overriding the config file path
pub const PUNCHCLOCK_CONFIG_ENV: &str = "PUNCHCLOCK_CONFIG";

/// Attendance log filename within the data directory
pub const LOG_FILENAME: &str = "attendance_log.txt";

const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "punchclock";

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$PUNCHCLOCK_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/punchclock` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/punchclock` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(PUNCHCLOCK_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking PUNCHCLOCK_DATA_DIR.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Get the default attendance log path inside the data directory.
pub fn default_log_path() -> PathBuf {
    default_data_dir().join(LOG_FILENAME)
}

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$PUNCHCLOCK_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/punchclock/config.toml`
/// 3. `~/.config/punchclock/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(PUNCHCLOCK_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking PUNCHCLOCK_CONFIG.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}
