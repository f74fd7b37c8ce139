//! Observability for the checksum engine
//!
//! - Structured JSON-line logging with a per-logger severity threshold
//! - Typed events
//! - Atomic counters
//!
//! Observability is read-only: nothing here influences a computed checksum.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{LogSink, Logger, Severity};
pub use metrics::{ChecksumMetrics, MetricsSnapshot};
