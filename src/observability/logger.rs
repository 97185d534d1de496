//! Structured logger
//!
//! - One log call = one event with key/value fields
//! - Explicit severity levels
//! - Bound tags (e.g. `run_id`) are attached to every line of a child logger
//! - Sinks are pluggable; logging never fails the caller

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Destination for structured log lines.
pub trait LogSink: Send + Sync {
    /// Record one event. Must not panic and must not block for long.
    fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]);
}

/// Cloneable logging handle carrying a sink plus bound tags.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    tags: Vec<(&'static str, String)>,
}

impl Logger {
    /// Create a logger writing to `sink`.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            tags: Vec::new(),
        }
    }

    /// Logger that forwards to the `tracing` dispatcher.
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    /// Child logger with an extra tag bound to every line.
    pub fn with(&self, key: &'static str, value: impl Into<String>) -> Self {
        let mut tags = self.tags.clone();
        tags.push((key, value.into()));
        Self {
            sink: Arc::clone(&self.sink),
            tags,
        }
    }

    /// Tags bound to this logger.
    pub fn tags(&self) -> &[(&'static str, String)] {
        &self.tags
    }

    /// Log an event at an explicit severity.
    ///
    /// Bound tags come first, call-site fields after.
    pub fn log(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if self.tags.is_empty() {
            self.sink.log(severity, event.as_str(), fields);
            return;
        }

        let mut all: Vec<(&str, &str)> = self
            .tags
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        all.extend_from_slice(fields);
        self.sink.log(severity, event.as_str(), &all);
    }

    /// Log an event at its default severity.
    pub fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(event.severity(), event, fields);
    }

    /// Log at TRACE level
    pub fn trace(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("tags", &self.tags).finish()
    }
}

/// Forwards events to `tracing`, with fields rendered as `key="value"` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Values are quoted and escaped so spaces and quotes stay unambiguous.
    fn render_fields(fields: &[(&str, &str)]) -> String {
        fields
            .iter()
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let rendered = Self::render_fields(fields);

        match severity {
            Severity::Trace => tracing::trace!(event = %event, fields = %rendered),
            Severity::Info => tracing::info!(event = %event, fields = %rendered),
            Severity::Warn => tracing::warn!(event = %event, fields = %rendered),
            Severity::Error => tracing::error!(event = %event, fields = %rendered),
        }
    }
}

/// Writes one JSON object per line.
///
/// Keys are emitted in sorted order so identical events produce identical
/// lines. `event` and `severity` cannot be overridden by fields.
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = Map::new();
        for (key, value) in fields {
            line.insert((*key).to_string(), Value::String((*value).to_string()));
        }
        line.insert("event".to_string(), Value::String(event.to_string()));
        line.insert(
            "severity".to_string(),
            Value::String(severity.as_str().to_string()),
        );

        let mut output = Value::Object(line).to_string();
        output.push('\n');
        output
    }
}

impl<W: Write + Send> LogSink for JsonSink<W> {
    fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let output = Self::render(severity, event, fields);
        if let Ok(mut writer) = self.writer.lock() {
            // Write atomically (one call)
            let _ = writer.write_all(output.as_bytes());
            let _ = writer.flush();
        }
    }
}

/// One captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub event: String,
    pub fields: BTreeMap<String, String>,
}

impl LogEntry {
    /// Value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Keeps log lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Entries recorded for `event`.
    pub fn find(&self, event: Event) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.event == event.as_str())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let entry = LogEntry {
            severity,
            event: event.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}
