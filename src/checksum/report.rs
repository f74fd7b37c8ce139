//! Verification outcome and checksum formatting

use std::fmt;

use serde::Serialize;

/// Result of verifying a buffer that was long enough to check.
///
/// `valid` is always `stored == computed`; the fields are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    stored: u32,
    computed: u32,
    valid: bool,
}

impl VerificationReport {
    pub fn new(stored: u32, computed: u32) -> Self {
        Self {
            stored,
            computed,
            valid: stored == computed,
        }
    }

    /// Checksum read from bytes 8..12
    pub fn stored(&self) -> u32 {
        self.stored
    }

    /// Checksum computed over every other byte
    pub fn computed(&self) -> u32 {
        self.computed
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Status word shown next to the two checksums
    pub fn status(&self) -> &'static str {
        if self.valid {
            "Valid"
        } else {
            "Invalid"
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original Checksum: {}", format_checksum(self.stored))?;
        writeln!(f, "Calculated Checksum: {}", format_checksum(self.computed))?;
        write!(f, "Status: {}", self.status())
    }
}

/// Formats a checksum as `0x` followed by 8 lowercase hex digits.
///
/// ```
/// use savesum::format_checksum;
/// assert_eq!(format_checksum(0x14F00000), "0x14f00000");
/// ```
pub fn format_checksum(checksum: u32) -> String {
    format!("0x{:08x}", checksum)
}

/// Parses a hex checksum, with or without a `0x` prefix.
///
/// Returns `None` if the string is empty or not valid hex for a u32.
pub fn parse_checksum(formatted: &str) -> Option<u32> {
    let trimmed = formatted.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_derived_from_equality() {
        assert!(VerificationReport::new(7, 7).is_valid());
        assert!(!VerificationReport::new(7, 8).is_valid());
        assert_eq!(VerificationReport::new(7, 8).stored(), 7);
        assert_eq!(VerificationReport::new(7, 8).computed(), 8);
    }

    #[test]
    fn test_display_lines() {
        let report = VerificationReport::new(0xDEADBEEF, 0x14F00000);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Original Checksum: 0xdeadbeef");
        assert_eq!(lines[1], "Calculated Checksum: 0x14f00000");
        assert_eq!(lines[2], "Status: Invalid");
    }

    #[test]
    fn test_format_checksum() {
        assert_eq!(format_checksum(0), "0x00000000");
        assert_eq!(format_checksum(0x14D), "0x0000014d");
        assert_eq!(format_checksum(u32::MAX), "0xffffffff");
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum("0x14f00000"), Some(0x14F00000));
        assert_eq!(parse_checksum("0XDEADBEEF"), Some(0xDEADBEEF));
        assert_eq!(parse_checksum("14d"), Some(0x14D));
    }

    #[test]
    fn test_parse_checksum_invalid() {
        assert_eq!(parse_checksum(""), None);
        assert_eq!(parse_checksum("0x"), None);
        assert_eq!(parse_checksum("0x+1"), None);
        assert_eq!(parse_checksum("zzzz"), None);
        assert_eq!(parse_checksum("0x100000000"), None);
    }

    #[test]
    fn test_serializes_for_display() {
        let json = serde_json::to_value(VerificationReport::new(1, 2)).unwrap();
        assert_eq!(json["stored"], 1);
        assert_eq!(json["computed"], 2);
        assert_eq!(json["valid"], false);
    }
}
