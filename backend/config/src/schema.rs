//! Log configuration schema.
//!
//! Mirrors the flat `config/log.yaml` mapping. Every key is optional; missing
//! numeric keys read as zero and missing strings as empty.

use serde::{Deserialize, Serialize};

/// Root of `config/log.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Minimum severity written to the general log file.
    pub levels: String,

    /// Directory holding the rotated log files.
    pub log_dir: String,

    /// Rotate a file once it would grow past this many megabytes.
    pub max_size: i64,

    /// Delete rotated files older than this many days.
    pub max_age: i64,

    /// Maximum number of rotated files kept per log file.
    pub max_backups: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_keys() {
        let yaml = "levels: warn\nlogDir: logs\nmaxSize: 10\nmaxAge: 7\nmaxBackups: 5\n";
        let cfg: LogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            cfg,
            LogConfig {
                levels: "warn".to_string(),
                log_dir: "logs".to_string(),
                max_size: 10,
                max_age: 7,
                max_backups: 5,
            }
        );
    }

    #[test]
    fn missing_keys_read_as_zero_and_empty() {
        let cfg: LogConfig = serde_yaml::from_str("logDir: out\n").unwrap();
        assert_eq!(cfg.log_dir, "out");
        assert!(cfg.levels.is_empty());
        assert_eq!((cfg.max_size, cfg.max_age, cfg.max_backups), (0, 0, 0));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg: LogConfig = serde_yaml::from_str("logDir: out\ncompress: true\n").unwrap();
        assert_eq!(cfg.log_dir, "out");
    }

    #[test]
    fn rejects_type_mismatch() {
        assert!(serde_yaml::from_str::<LogConfig>("maxSize: huge\n").is_err());
    }
}
