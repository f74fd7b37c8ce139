//! Save file checksum engine
//!
//! A save buffer carries a 4-byte little-endian checksum at offsets 8..12.
//! The checksum is a rolling rotate-and-add hash, seeded with `0x14D`, over
//! every other byte of the buffer.
//!
//! # Operations
//!
//! - `calculate`: hash a buffer; never fails
//! - `verify`: compare the stored checksum with a fresh one
//! - `update`: return a copy of the buffer with a fresh checksum stamped in
//!
//! `verify` and `update` require at least 12 bytes and fail with
//! `ChecksumError::OutOfRange` otherwise. A checksum mismatch is reported as
//! `valid == false`, never as an error.
//!
//! Inputs are never mutated and never retained past a call.

mod errors;
mod layout;
mod report;
mod rolling;

pub use errors::{ChecksumError, ChecksumResult};
pub use layout::{
    ensure_len, is_checksum_byte, read_stored_checksum, write_checksum, CHECKSUM_END,
    CHECKSUM_LEN, CHECKSUM_OFFSET, CHECKSUM_SEED, MIN_BUFFER_LEN,
};
pub use report::{format_checksum, parse_checksum, VerificationReport};
pub use rolling::{calculate, RollingChecksum};

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::observability::{ChecksumMetrics, Event, LogSink, Logger};

/// Checksum engine.
///
/// Holds only configuration, a logger and an optional metrics registry;
/// results depend on the input buffer alone. The engine is `Send + Sync`
/// and can be shared. The default engine logs ERROR and above to stderr and
/// nothing else.
#[derive(Debug, Clone, Default)]
pub struct ChecksumEngine {
    config: EngineConfig,
    logger: Logger,
    metrics: Option<Arc<ChecksumMetrics>>,
}

impl ChecksumEngine {
    /// Engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration; `log_level` sets the logger threshold
    pub fn with_config(config: EngineConfig) -> ChecksumResult<Self> {
        config.validate()?;
        let logger = Logger::new(config.severity()?);
        Ok(Self {
            config,
            logger,
            metrics: None,
        })
    }

    /// Redirect log lines to `sink`, keeping the configured threshold
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.logger = Logger::with_sink(sink, self.logger.min_severity());
        self
    }

    /// Attach a metrics registry, possibly shared with other engines
    pub fn with_metrics(mut self, metrics: Arc<ChecksumMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn logs(&self, event: Event) -> bool {
        self.logger.enabled(event.severity())
    }

    /// Computes the rolling checksum of `buffer`, skipping bytes 8..12.
    pub fn calculate(&self, buffer: &[u8]) -> u32 {
        let checksum = if self.config.trace_bytes > 0 && self.logs(Event::ChecksumByte) {
            self.calculate_traced(buffer)
        } else {
            calculate(buffer)
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_calculation(buffer.len() as u64);
        }
        if self.logs(Event::ChecksumCalculated) {
            let len = buffer.len().to_string();
            let value = format_checksum(checksum);
            self.logger.event(
                Event::ChecksumCalculated,
                &[("checksum", value.as_str()), ("len", len.as_str())],
            );
        }

        checksum
    }

    /// Hashes like `calculate`, tracing every hashed index below `trace_bytes`
    fn calculate_traced(&self, buffer: &[u8]) -> u32 {
        let window = self.config.trace_bytes.min(buffer.len());
        let mut hasher = RollingChecksum::new();

        for (index, &byte) in buffer[..window].iter().enumerate() {
            let previous = hasher.value();
            if hasher.update_byte(byte) {
                let index = index.to_string();
                let value = byte.to_string();
                let previous = format_checksum(previous);
                let current = format_checksum(hasher.value());
                self.logger.event(
                    Event::ChecksumByte,
                    &[
                        ("checksum", current.as_str()),
                        ("index", index.as_str()),
                        ("previous", previous.as_str()),
                        ("value", value.as_str()),
                    ],
                );
            }
        }

        hasher.update(&buffer[window..]);
        hasher.finalize()
    }

    /// Verifies the checksum stored at offset 8 against a fresh calculation.
    ///
    /// # Errors
    ///
    /// `ChecksumError::OutOfRange` if `buffer` is shorter than 12 bytes. A
    /// mismatch is not an error: it returns a report with `valid == false`.
    pub fn verify(&self, buffer: &[u8]) -> ChecksumResult<VerificationReport> {
        self.require_field(buffer, "verify")?;

        if !self.config.is_known_size(buffer.len()) && self.logs(Event::UnexpectedSize) {
            let len = buffer.len().to_string();
            let known = format!("{:?}", self.config.known_sizes);
            self.logger.event(
                Event::UnexpectedSize,
                &[("known_sizes", known.as_str()), ("len", len.as_str())],
            );
        }

        let stored = read_stored_checksum(buffer)?;
        let computed = self.calculate(buffer);
        let report = VerificationReport::new(stored, computed);

        if let Some(metrics) = &self.metrics {
            metrics.record_verification(report.is_valid());
        }

        let event = if report.is_valid() {
            Event::ChecksumVerified
        } else {
            Event::ChecksumMismatch
        };
        if self.logs(event) {
            let stored = format_checksum(report.stored());
            let computed = format_checksum(report.computed());
            self.logger.event(
                event,
                &[("computed", computed.as_str()), ("stored", stored.as_str())],
            );
        }

        Ok(report)
    }

    /// Returns a copy of `buffer` with a freshly calculated checksum written
    /// little-endian at offset 8. The input is left untouched.
    ///
    /// # Errors
    ///
    /// `ChecksumError::OutOfRange` if `buffer` is shorter than 12 bytes; the
    /// buffer is never extended to make room.
    pub fn update(&self, buffer: &[u8]) -> ChecksumResult<Vec<u8>> {
        self.require_field(buffer, "update")?;

        let checksum = self.calculate(buffer);
        let mut updated = buffer.to_vec();
        write_checksum(&mut updated, checksum)?;

        if let Some(metrics) = &self.metrics {
            metrics.increment_updates();
        }
        if self.logs(Event::ChecksumUpdated) {
            let value = format_checksum(checksum);
            self.logger
                .event(Event::ChecksumUpdated, &[("checksum", value.as_str())]);
        }

        Ok(updated)
    }

    fn require_field(&self, buffer: &[u8], operation: &'static str) -> ChecksumResult<()> {
        ensure_len(buffer, operation).map_err(|err| {
            if let Some(metrics) = &self.metrics {
                metrics.increment_out_of_range();
            }
            if self.logs(Event::OutOfRange) {
                let message = err.to_string();
                self.logger.event(
                    Event::OutOfRange,
                    &[("code", err.code()), ("message", message.as_str())],
                );
            }
            err
        })
    }
}
