//! Observable checksum events
//!
//! Events are explicit and typed; each has a stable wire name.

use std::fmt;

use super::logger::Severity;

/// Observable events emitted by the checksum engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A checksum was computed over a buffer
    ChecksumCalculated,
    /// One byte folded into the accumulator (trace only)
    ChecksumByte,
    /// Stored and computed checksums matched
    ChecksumVerified,
    /// Stored and computed checksums differ
    ChecksumMismatch,
    /// A fresh checksum was stamped into a copy of the buffer
    ChecksumUpdated,
    /// Buffer length is not one of the known save sizes
    UnexpectedSize,
    /// Buffer too short to hold the checksum field
    OutOfRange,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ChecksumCalculated => "CHECKSUM_CALCULATED",
            Event::ChecksumByte => "CHECKSUM_BYTE",
            Event::ChecksumVerified => "CHECKSUM_VERIFIED",
            Event::ChecksumMismatch => "CHECKSUM_MISMATCH",
            Event::ChecksumUpdated => "CHECKSUM_UPDATED",
            Event::UnexpectedSize => "UNEXPECTED_SIZE",
            Event::OutOfRange => "OUT_OF_RANGE",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ChecksumByte => Severity::Trace,
            Event::ChecksumCalculated
            | Event::ChecksumVerified
            | Event::ChecksumUpdated => Severity::Info,
            Event::ChecksumMismatch | Event::UnexpectedSize => Severity::Warn,
            Event::OutOfRange => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
