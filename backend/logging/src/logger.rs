//! Logger construction and the `Logger` handle.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use logfacade_config::{LogConfig, apply_rotation_defaults};
use tracing::Level;
use tracing::dispatcher::{self, Dispatch, SetGlobalDefaultError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;

use crate::error::LoggingError;
use crate::format::with_handle_fields;
use crate::level::{FATAL_TARGET, Severity, Threshold};
use crate::rotate::RotationPolicy;
use crate::sink::file_layers;

/// Field attached to every entry of the handle returned by [`init_logger`].
pub const MODULE_FIELD: &str = "mod";
pub const MODULE_NAME: &str = "main";

/// Key used by [`Logger::with_error`].
pub const ERROR_FIELD: &str = "error";

const HANDLE_TARGET: &str = "logfacade";

/// Report whether `path` exists. Errors other than "not found" are returned.
pub(crate) fn path_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Build a logger writing to the rotating files under `config.log_dir`.
///
/// Creates the log directory (one level, not recursively) when it is missing
/// and opens `general.log` plus one file per severity. The returned handle
/// carries `mod=main`.
pub fn init_logger(config: &LogConfig) -> Result<Logger, LoggingError> {
    let dir = Path::new(&config.log_dir);
    ensure_log_dir(dir)?;

    let level = Threshold::parse_or_default(&config.levels);

    let config = apply_rotation_defaults(config.clone());
    let policy = RotationPolicy {
        max_size_mb: config.max_size,
        max_age_days: config.max_age,
        max_backups: config.max_backups,
        local_time: true,
    };

    let subscriber = Registry::default().with(file_layers(dir, policy, level)?);

    let logger = Logger {
        dispatch: Dispatch::new(subscriber),
        fields: Arc::default(),
        level,
        policy,
    };
    Ok(logger.with_field(MODULE_FIELD, MODULE_NAME))
}

fn ensure_log_dir(dir: &Path) -> Result<(), LoggingError> {
    // A failed stat counts as absent; create_dir then reports the real cause.
    if path_exists(dir).unwrap_or(false) {
        return Ok(());
    }
    fs::create_dir(dir).map_err(|source| LoggingError::CreateLogDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Handle for emitting log entries.
///
/// Cloning is cheap. Each `with_*` call returns a new handle with extra
/// fields and leaves the receiver untouched.
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
    fields: Arc<BTreeMap<String, String>>,
    level: Threshold,
    policy: RotationPolicy,
}

impl Logger {
    pub fn with_field(&self, key: impl Into<String>, value: impl fmt::Display) -> Logger {
        self.with_fields([(key, value)])
    }

    pub fn with_fields<I, K, V>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        let mut merged = (*self.fields).clone();
        for (key, value) in fields {
            merged.insert(key.into(), value.to_string());
        }
        Logger {
            fields: Arc::new(merged),
            ..self.clone()
        }
    }

    pub fn with_error(&self, err: &dyn std::error::Error) -> Logger {
        self.with_field(ERROR_FIELD, err)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Minimum level written to `general.log`.
    pub fn level(&self) -> Threshold {
        self.level
    }

    /// Rotation policy shared by all of this logger's files.
    pub fn rotation_policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Make this logger the process-wide `tracing` dispatcher.
    pub(crate) fn install_global(&self) -> Result<(), SetGlobalDefaultError> {
        dispatcher::set_global_default(self.dispatch.clone())
    }

    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        macro_rules! emit {
            ($target:expr, $level:expr) => {
                tracing::event!(target: $target, $level, "{}", message)
            };
        }

        dispatcher::with_default(&self.dispatch, || {
            with_handle_fields(&self.fields, || match severity {
                Severity::Debug => emit!(HANDLE_TARGET, Level::DEBUG),
                Severity::Info => emit!(HANDLE_TARGET, Level::INFO),
                Severity::Warn => emit!(HANDLE_TARGET, Level::WARN),
                Severity::Error => emit!(HANDLE_TARGET, Level::ERROR),
                Severity::Fatal => emit!(FATAL_TARGET, Level::ERROR),
            })
        });
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    /// Log at fatal severity to `fatal.log` (and `general.log`).
    ///
    /// The process keeps running afterwards. Callers that must stop on a
    /// fatal condition exit themselves once this returns, so the entry is
    /// already on disk.
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Severity::Fatal, message);
    }
}
