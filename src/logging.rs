//! Logging configuration and initialization.
//!
//! Console narration goes through a `tracing_subscriber` fmt layer. ERROR
//! events are additionally appended to a flat log file, one line each, as
//! `<timestamp> - <LEVEL> - <message>`.

use std::fmt::{self, Write as _};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt as fmt_layer};

use crate::error::{PayrollError, PayrollResult};

/// Timestamp format of log file lines.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Appends ERROR events to a file.
#[derive(Debug)]
pub struct ErrorLogLayer<W> {
    writer: Mutex<W>,
}

impl ErrorLogLayer<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> PayrollResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| PayrollError::InvalidSetting {
                key: path.display().to_string(),
                message: format!("cannot open log file: {}", e),
            })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ErrorLogLayer<W> {
    /// Wraps an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<S, W> Layer<S> for ErrorLogLayer<W>
where
    S: Subscriber,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level != Level::ERROR {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = format!(
            "{} - {} - {}\n",
            Local::now().format(LOG_TIMESTAMP_FORMAT),
            level,
            visitor.finish()
        );

        // A poisoned or failing log sink must not take the batch down.
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(line.as_bytes());
            let _ = writer.flush();
        }
    }
}

/// Collects the `message` field and any structured fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Installs the global subscriber: console output filtered by `RUST_LOG`
/// (or the verbosity flag) plus the ERROR log file.
pub fn init_logging(log_file: &Path, verbose: u8) -> PayrollResult<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt_layer::layer()
                .with_target(verbose >= 2)
                .with_filter(filter),
        )
        .with(ErrorLogLayer::open(log_file)?)
        .init();

    Ok(())
}
