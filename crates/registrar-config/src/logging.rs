//! Log output settings.
//!
//! - `LOG_LEVEL`: filter used when `RUST_LOG` is unset (default: `info`)
//! - `LOG_DIR`: directory for rolling log files (default: `storage/logs`)
//! - `LOG_JSON_FILE`: also write JSON logs to `LOG_DIR` (default: false)

use std::env;

use crate::env_flag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: String,
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "storage/logs".to_string(),
            json_file: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("LOG_LEVEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.level),
            dir: env::var("LOG_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.dir),
            json_file: env_flag("LOG_JSON_FILE", defaults.json_file),
        }
    }
}
