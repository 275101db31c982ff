//! The file layers a logger writes through.
//!
//! One `fmt` layer per file, each with its own writer and filter. There is
//! no stdout layer, so nothing a logger emits reaches standard output.

use std::path::Path;
use std::sync::Mutex;

use tracing::Metadata;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt;
use tracing_subscriber::registry::Registry;

use crate::error::LoggingError;
use crate::format::LogfmtFormat;
use crate::level::{Severity, Threshold};
use crate::rotate::{RollingFile, RotationPolicy};

/// File receiving every entry the configured threshold allows.
pub(crate) const GENERAL_FILE_NAME: &str = "general.log";

pub(crate) type FileLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Open `general.log` plus one file per severity in `dir`.
///
/// The general file honours `threshold`. Each per-level file receives every
/// entry of exactly its severity, whatever the threshold.
pub(crate) fn file_layers(
    dir: &Path,
    policy: RotationPolicy,
    threshold: Threshold,
) -> Result<Vec<FileLayer>, LoggingError> {
    let mut layers = Vec::with_capacity(Severity::ALL.len() + 1);
    layers.push(file_layer(dir, GENERAL_FILE_NAME, policy, move |meta| {
        Severity::of(meta).is_some_and(|severity| threshold.allows(severity))
    })?);
    for severity in Severity::ALL {
        layers.push(file_layer(dir, &severity.file_name(), policy, move |meta| {
            Severity::of(meta) == Some(severity)
        })?);
    }
    Ok(layers)
}

fn file_layer<F>(
    dir: &Path,
    name: &str,
    policy: RotationPolicy,
    accepts: F,
) -> Result<FileLayer, LoggingError>
where
    F: Fn(&Metadata<'_>) -> bool + Send + Sync + 'static,
{
    let file = RollingFile::open(dir, name, policy).map_err(|source| LoggingError::OpenSink {
        path: dir.join(name),
        source,
    })?;

    Ok(fmt::layer::<Registry>()
        .with_ansi(false)
        .event_format(LogfmtFormat::default())
        .with_writer(Mutex::new(file))
        .with_filter(filter_fn(accepts))
        .boxed())
}
