//! Process-wide logger writing per-level rotating log files.
//!
//! Reads `config/log.yaml`, creates the log directory, and writes every entry
//! to its severity's file (`debug.log`, `info.log`, `warn.log`, `error.log`,
//! `fatal.log`) and, when the configured level allows it, to `general.log`.
//! Nothing is written to stdout.

mod error;
mod format;
mod global;
mod level;
mod logger;
mod rotate;
mod sink;

pub use error::LoggingError;
pub use global::{logger, logger_from_path};
pub use level::{FATAL_TARGET, ParseSeverityError, Severity, Threshold};
pub use logger::{Logger, init_logger};
pub use rotate::RotationPolicy;

pub use logfacade_config::LogConfig;
