//! Plain-text line format for the file layers.
//!
//! Lines follow the logfmt layout:
//! `time="2024-05-01 10:00:00" level=info msg=started mod=main`.
//! The fixed keys come first. Event fields and the fields of the emitting
//! [`crate::Logger`] handle follow as one set in key order.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::level::Severity;

/// Values made only of these characters are written unquoted.
static BARE_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-._/@^+]*$").unwrap());

/// Timestamp layout of the `time` key.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type FieldMap = BTreeMap<String, String>;

thread_local! {
    static HANDLE_FIELDS: RefCell<Option<Arc<FieldMap>>> = const { RefCell::new(None) };
}

/// Run `emit` with `fields` attached to every event it produces on this thread.
pub(crate) fn with_handle_fields<R>(fields: &Arc<FieldMap>, emit: impl FnOnce() -> R) -> R {
    let previous = HANDLE_FIELDS.with(|cell| cell.replace(Some(Arc::clone(fields))));
    let result = emit();
    HANDLE_FIELDS.with(|cell| *cell.borrow_mut() = previous);
    result
}

/// Event formatter with colors disabled and full local timestamps.
pub(crate) struct LogfmtFormat {
    timer: ChronoLocal,
}

impl Default for LogfmtFormat {
    fn default() -> Self {
        Self {
            timer: ChronoLocal::new(TIMESTAMP_FORMAT.to_string()),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LogfmtFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let Some(severity) = Severity::of(event.metadata()) else {
            return Ok(());
        };

        let mut time = String::new();
        self.timer.format_time(&mut Writer::new(&mut time))?;

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        HANDLE_FIELDS.with(|cell| {
            if let Some(fields) = cell.borrow().as_deref() {
                for (key, value) in fields {
                    visitor
                        .fields
                        .entry(key.clone())
                        .or_insert_with(|| value.clone());
                }
            }
        });

        writer.write_str(&render_line(&time, severity, &visitor.message, &visitor.fields))
    }
}

/// Render one newline-terminated line.
fn render_line(time: &str, severity: Severity, message: &str, fields: &FieldMap) -> String {
    let mut line = String::with_capacity(128);
    write_pair(&mut line, "time", time);
    write_pair(&mut line, "level", severity.label());
    if !message.is_empty() {
        write_pair(&mut line, "msg", message);
    }
    for (key, value) in fields {
        write_pair(&mut line, key, value);
    }
    line.push('\n');
    line
}

/// Append ` key=value` (no leading space on an empty line), quoting the value if needed.
fn write_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(key);
    out.push('=');
    if BARE_VALUE_RE.is_match(value) {
        out.push_str(value);
    } else {
        let _ = write!(out, "{value:?}");
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: FieldMap,
}

impl FieldVisitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            name => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }
}
