//! Checksum error types
//!
//! Error codes:
//! - SAVESUM_OUT_OF_RANGE
//! - SAVESUM_MALFORMED_INPUT
//! - SAVESUM_CONFIG
//!
//! A checksum mismatch is not an error; it is a report with `valid == false`.

use thiserror::Error;

/// Result type for checksum operations
pub type ChecksumResult<T> = Result<T, ChecksumError>;

/// Checksum errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// Buffer too short to read or write the checksum field
    #[error("{operation}: buffer of {len} bytes is shorter than the required {required}")]
    OutOfRange {
        operation: &'static str,
        len: usize,
        required: usize,
    },

    /// Reserved for validation beyond length
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ChecksumError {
    pub fn out_of_range(operation: &'static str, len: usize, required: usize) -> Self {
        ChecksumError::OutOfRange {
            operation,
            len,
            required,
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ChecksumError::OutOfRange { .. } => "SAVESUM_OUT_OF_RANGE",
            ChecksumError::MalformedInput(_) => "SAVESUM_MALFORMED_INPUT",
            ChecksumError::Config(_) => "SAVESUM_CONFIG",
        }
    }

    /// Checksum errors are caller errors, never fatal to the process
    pub fn is_fatal(&self) -> bool {
        false
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ChecksumError::OutOfRange { .. })
    }
}
