//! savesum - rolling checksum for fixed-layout save files
//!
//! A save buffer stores a little-endian u32 checksum at offsets 8..12,
//! computed over every other byte. This crate calculates that checksum,
//! verifies it, and stamps a fresh one into a copy of an edited buffer.
//!
//! ```
//! let mut save = vec![0u8; 32];
//! save[0] = 0x01;
//!
//! let stamped = savesum::update(&save).unwrap();
//! let report = savesum::verify(&stamped).unwrap();
//! assert!(report.is_valid());
//! assert!(savesum::verify(&save[..11]).is_err());
//! ```

pub mod checksum;
pub mod config;
pub mod observability;

pub use checksum::{
    calculate, format_checksum, parse_checksum, ChecksumEngine, ChecksumError, ChecksumResult,
    RollingChecksum, VerificationReport,
};
pub use config::EngineConfig;

/// Verify `buffer` with a default-configured engine
pub fn verify(buffer: &[u8]) -> ChecksumResult<VerificationReport> {
    ChecksumEngine::new().verify(buffer)
}

/// Stamp a fresh checksum into a copy of `buffer` with a default-configured engine
pub fn update(buffer: &[u8]) -> ChecksumResult<Vec<u8>> {
    ChecksumEngine::new().update(buffer)
}
