//! The process-wide logger.
//!
//! Built on first access from [`CONFIG_FILE_PATH`]. A missing or unreadable
//! config leaves it unset, so callers must handle `None`. A config that loads
//! but cannot be turned into a working logger ends the process with status 1,
//! whichever thread got there first.

use std::path::Path;
use std::process;
use std::sync::LazyLock;

use logfacade_config::{CONFIG_FILE_PATH, try_load};

use crate::error::LoggingError;
use crate::logger::{Logger, init_logger};

static LOGGER: LazyLock<Option<Logger>> = LazyLock::new(|| {
    match logger_from_path(Path::new(CONFIG_FILE_PATH)) {
        Ok(Some(logger)) => {
            // Another subscriber may already be installed; the handle works either way.
            let _ = logger.install_global();
            Some(logger)
        }
        Ok(None) => None,
        Err(e) => {
            eprintln!("logfacade: logger setup from {CONFIG_FILE_PATH} failed: {e}");
            process::exit(1);
        }
    }
});

/// The shared logger, or `None` when no usable config was found.
///
/// The first call also installs it as the global `tracing` dispatcher, so
/// plain `tracing` macros land in the same files.
pub fn logger() -> Option<&'static Logger> {
    LOGGER.as_ref()
}

/// Load the config at `path` and build a logger from it.
///
/// `Ok(None)` when the config is missing or invalid. `Err` when it loads but
/// the log directory or files cannot be set up.
pub fn logger_from_path(path: &Path) -> Result<Option<Logger>, LoggingError> {
    match try_load(path) {
        Some(config) => init_logger(&config).map(Some),
        None => Ok(None),
    }
}
