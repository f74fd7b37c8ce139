//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` and `severity` first, remaining fields in alphabetical order
//! - Synchronous, no buffering
//! - Events below the logger's threshold are dropped before any formatting

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-byte detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Advisories and checksum mismatches
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// ERROR and FATAL go to stderr, everything else to stdout
    pub fn uses_stderr(&self) -> bool {
        *self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            other => Err(format!("unknown log level: '{}'", other)),
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Process stdout/stderr, split by severity
    #[default]
    Stdio,
    /// In-memory buffer, for capture
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl LogSink {
    /// A new empty in-memory sink
    pub fn buffer() -> Self {
        LogSink::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    /// Everything written to a buffer sink so far; empty for stdio
    pub fn captured(&self) -> String {
        match self {
            LogSink::Stdio => String::new(),
            LogSink::Buffer(buffer) => buffer
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default(),
        }
    }

    fn write_line(&self, severity: Severity, line: &str) {
        match self {
            LogSink::Stdio if severity.uses_stderr() => write_flush(&mut io::stderr(), line),
            LogSink::Stdio => write_flush(&mut io::stdout(), line),
            LogSink::Buffer(buffer) => {
                if let Ok(mut bytes) = buffer.lock() {
                    bytes.extend_from_slice(line.as_bytes());
                }
            }
        }
    }
}

fn write_flush<W: Write>(writer: &mut W, line: &str) {
    let _ = writer.write_all(line.as_bytes());
    let _ = writer.flush();
}

/// A structured logger with its own threshold and sink
#[derive(Debug, Clone)]
pub struct Logger {
    sink: LogSink,
    min_severity: Severity,
}

impl Default for Logger {
    /// Quiet by default: only ERROR and FATAL reach stderr
    fn default() -> Self {
        Self::new(Severity::Error)
    }
}

impl Logger {
    /// Logger writing to stdout/stderr
    pub fn new(min_severity: Severity) -> Self {
        Self::with_sink(LogSink::Stdio, min_severity)
    }

    pub fn with_sink(sink: LogSink, min_severity: Severity) -> Self {
        Self { sink, min_severity }
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Whether an event at `severity` would be emitted
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    /// Log an event with the given severity and fields
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !self.enabled(severity) {
            return;
        }
        self.sink.write_line(severity, &render(severity, event, fields));
    }

    /// Log a typed event at its own severity
    pub fn event(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(event.severity(), event.as_str(), fields);
    }
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    let mut output = String::with_capacity(128);
    output.push_str("{\"event\":");
    output.push_str(&json_string(event));
    output.push_str(",\"severity\":\"");
    output.push_str(severity.as_str());
    output.push('"');

    for (key, value) in sorted_fields {
        output.push(',');
        output.push_str(&json_string(key));
        output.push(':');
        output.push_str(&json_string(value));
    }

    output.push_str("}\n");
    output
}

/// Capture a log line to a string for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    render(severity, event, fields)
}
