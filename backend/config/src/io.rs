//! Config file reading.

use crate::schema::LogConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Location of the log config, relative to the working directory.
pub const CONFIG_FILE_PATH: &str = "config/log.yaml";

/// Read and parse the log config at `path`.
pub fn load_config(path: &Path) -> Result<LogConfig> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read log config: {}", path.display()))?;

    let config: LogConfig = serde_yaml::from_slice(&raw)
        .with_context(|| format!("Failed to parse log config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded log config");
    Ok(config)
}

/// Load the config at `path`, treating any read or parse failure as "not configured".
pub fn try_load(path: &Path) -> Option<LogConfig> {
    match load_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!(path = %path.display(), error = %format!("{e:#}"), "Log config unavailable");
            None
        }
    }
}

/// Load the config from [`CONFIG_FILE_PATH`].
pub fn load() -> Option<LogConfig> {
    try_load(Path::new(CONFIG_FILE_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.yaml");
        fs::write(&path, "levels: info\nlogDir: logs\nmaxSize: 50\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.levels, "info");
        assert_eq!(cfg.log_dir, "logs");
        assert_eq!(cfg.max_size, 50);
        assert_eq!(cfg.max_age, 0);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_load(&dir.path().join("nope.yaml")).is_none());
    }

    #[test]
    fn malformed_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.yaml");
        fs::write(&path, "levels: [unterminated\n").unwrap();
        assert!(try_load(&path).is_none());
    }

    #[test]
    fn type_mismatch_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.yaml");
        fs::write(&path, "logDir: logs\nmaxBackups: lots\n").unwrap();
        assert!(try_load(&path).is_none());
    }

    #[test]
    fn default_location_is_relative() {
        assert_eq!(CONFIG_FILE_PATH, "config/log.yaml");
        // The crate directory carries no config/log.yaml.
        assert!(load().is_none());
    }

    #[test]
    fn strict_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
