//! Rotation defaults: substitutes values for unset (zero) rotation fields.

use crate::schema::LogConfig;

/// Default rotation size, in megabytes.
pub const DEFAULT_MAX_SIZE_MB: i64 = 100;

/// Default retention of rotated files, in days.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 3;

/// Default number of rotated files kept per log file.
pub const DEFAULT_MAX_BACKUPS: i64 = 3;

/// Replace zero rotation fields with their defaults.
///
/// Only an exact zero counts as unset. Negative values are passed through.
pub fn apply_rotation_defaults(mut config: LogConfig) -> LogConfig {
    if config.max_backups == 0 {
        config.max_backups = DEFAULT_MAX_BACKUPS;
    }
    if config.max_size == 0 {
        config.max_size = DEFAULT_MAX_SIZE_MB;
    }
    if config.max_age == 0 {
        config.max_age = DEFAULT_MAX_AGE_DAYS;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_zero_fields() {
        let cfg = apply_rotation_defaults(LogConfig::default());
        assert_eq!(cfg.max_size, DEFAULT_MAX_SIZE_MB);
        assert_eq!(cfg.max_age, DEFAULT_MAX_AGE_DAYS);
        assert_eq!(cfg.max_backups, DEFAULT_MAX_BACKUPS);
    }

    #[test]
    fn does_not_override_user_values() {
        let cfg = apply_rotation_defaults(LogConfig {
            max_size: 1,
            max_age: 30,
            max_backups: 10,
            ..Default::default()
        });
        assert_eq!((cfg.max_size, cfg.max_age, cfg.max_backups), (1, 30, 10));
    }

    #[test]
    fn negative_values_are_not_clamped() {
        let cfg = apply_rotation_defaults(LogConfig {
            max_size: -5,
            max_age: -1,
            max_backups: -2,
            ..Default::default()
        });
        assert_eq!((cfg.max_size, cfg.max_age, cfg.max_backups), (-5, -1, -2));
    }

    #[test]
    fn leaves_string_fields_alone() {
        let cfg = apply_rotation_defaults(LogConfig {
            levels: "debug".into(),
            log_dir: "logs".into(),
            ..Default::default()
        });
        assert_eq!(cfg.levels, "debug");
        assert_eq!(cfg.log_dir, "logs");
    }
}
