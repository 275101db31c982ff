//! Severity levels, the general-file threshold, and file routing names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::Metadata;

/// `tracing` target that marks an `ERROR` event as fatal.
///
/// `tracing` has no fatal level, so `tracing::error!(target: FATAL_TARGET, ..)`
/// is routed to `fatal.log`.
pub const FATAL_TARGET: &str = "logfacade::fatal";

/// Ordered log severity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

#[derive(Debug, Error)]
#[error("not a valid severity level: {0:?}")]
pub struct ParseSeverityError(String);

impl Severity {
    /// Every severity, in ascending order. Each one gets its own log file.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Name printed in the `level=` key of a formatted line.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warn => "warning",
            other => other.as_str(),
        }
    }

    /// File this severity is routed to, e.g. `warn.log`.
    pub fn file_name(self) -> String {
        format!("{}.log", self.as_str())
    }

    /// Severity of a `tracing` event. `TRACE` sits below every file and yields `None`.
    pub fn of(metadata: &Metadata<'_>) -> Option<Severity> {
        if metadata.target() == FATAL_TARGET {
            return Some(Severity::Fatal);
        }
        match *metadata.level() {
            tracing::Level::TRACE => None,
            tracing::Level::DEBUG => Some(Severity::Debug),
            tracing::Level::INFO => Some(Severity::Info),
            tracing::Level::WARN => Some(Severity::Warn),
            _ => Some(Severity::Error),
        }
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum level an entry needs to reach `general.log`.
///
/// Besides the five severities, `trace` lets everything through and `panic`
/// sits above `fatal`, so nothing reaches the general file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    Trace,
    AtLeast(Severity),
    Panic,
}

impl Threshold {
    /// Threshold used when the configured one cannot be parsed.
    pub const DEFAULT: Threshold = Threshold::AtLeast(Severity::Info);

    /// Parse a configured level, silently falling back to [`Threshold::DEFAULT`].
    pub fn parse_or_default(s: &str) -> Threshold {
        s.parse().unwrap_or(Threshold::DEFAULT)
    }

    pub fn allows(self, severity: Severity) -> bool {
        match self {
            Threshold::Trace => true,
            Threshold::AtLeast(min) => severity >= min,
            Threshold::Panic => false,
        }
    }
}

impl FromStr for Threshold {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Threshold::Trace),
            "panic" => Ok(Threshold::Panic),
            _ => s.parse().map(Threshold::AtLeast),
        }
    }
}
