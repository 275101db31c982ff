use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while setting up the logger. None of them are recoverable.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {}: {source}", path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
