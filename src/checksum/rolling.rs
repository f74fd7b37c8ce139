//! Rolling rotate-and-add checksum
//!
//! For every byte outside the checksum field, in index order:
//! rotate the accumulator right by one bit, then add the byte (wrapping).
//! Bytes 8..12 contribute neither a rotation nor an addition.

use super::layout::{is_checksum_byte, CHECKSUM_END, CHECKSUM_OFFSET, CHECKSUM_SEED};

/// Computes the checksum of a whole buffer in one pass.
///
/// Never fails. Buffers shorter than 12 bytes hash whatever bytes they have
/// outside the checksum field.
pub fn calculate(buffer: &[u8]) -> u32 {
    let mut hasher = RollingChecksum::new();
    hasher.update(buffer);
    hasher.finalize()
}

#[inline]
fn step(acc: u32, byte: u8) -> u32 {
    acc.rotate_right(1).wrapping_add(u32::from(byte))
}

/// Incremental form of [`calculate`].
///
/// Tracks the absolute offset of every byte fed, so a buffer split at any
/// point and fed piecewise in order produces the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingChecksum {
    acc: u32,
    offset: usize,
}

impl RollingChecksum {
    pub fn new() -> Self {
        Self {
            acc: CHECKSUM_SEED,
            offset: 0,
        }
    }

    /// Feeds the next `chunk` of the buffer
    pub fn update(&mut self, chunk: &[u8]) {
        let start = self.offset;
        let end = start + chunk.len();

        // Fast path: chunk lies entirely on one side of the field
        if end <= CHECKSUM_OFFSET || start >= CHECKSUM_END {
            self.acc = chunk.iter().fold(self.acc, |acc, &b| step(acc, b));
        } else {
            for (i, &b) in chunk.iter().enumerate() {
                if !is_checksum_byte(start + i) {
                    self.acc = step(self.acc, b);
                }
            }
        }

        self.offset = end;
    }

    /// Feeds a single byte, returning whether it was hashed
    pub fn update_byte(&mut self, byte: u8) -> bool {
        let hashed = !is_checksum_byte(self.offset);
        if hashed {
            self.acc = step(self.acc, byte);
        }
        self.offset += 1;
        hashed
    }

    /// Current accumulator value
    pub fn value(&self) -> u32 {
        self.acc
    }

    /// Number of bytes fed so far, including skipped ones
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn finalize(self) -> u32 {
        self.acc
    }
}

impl Default for RollingChecksum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_seed() {
        assert_eq!(calculate(&[]), CHECKSUM_SEED);
    }

    #[test]
    fn test_single_byte() {
        // 0x14D rotated right: low bit wraps to bit 31
        assert_eq!(calculate(&[0x01]), 0x8000_00A7);
    }

    #[test]
    fn test_known_fixture() {
        let mut buffer = [0u8; 16];
        buffer[0] = 0x01;
        assert_eq!(calculate(&buffer), 0x14F0_0000);
    }

    #[test]
    fn test_field_bytes_skipped() {
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        a[8..12].copy_from_slice(&[1, 2, 3, 4]);
        b[8..12].copy_from_slice(&[0xFF; 4]);
        assert_eq!(calculate(&a), calculate(&b));
    }

    #[test]
    fn test_short_buffers_only_hash_header() {
        // Indices 8..11 are skipped, so 8, 11 and 12 zero bytes agree
        assert_eq!(calculate(&[0u8; 8]), 0x4D00_0001);
        assert_eq!(calculate(&[0u8; 11]), 0x4D00_0001);
        assert_eq!(calculate(&[0u8; 12]), 0x4D00_0001);
    }

    #[test]
    fn test_position_dependent() {
        let a = [1u8, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let b = [2u8, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_ne!(calculate(&a), calculate(&b));
    }

    #[test]
    fn test_chunked_matches_one_shot() {
        let data: Vec<u8> = (0..=255u8).collect();
        let expected = calculate(&data);
        assert_eq!(expected, 0xFFFF_970B);

        for split in [0, 1, 7, 8, 9, 10, 11, 12, 13, 100, 256] {
            let mut hasher = RollingChecksum::new();
            hasher.update(&data[..split]);
            hasher.update(&data[split..]);
            assert_eq!(hasher.finalize(), expected, "split at {}", split);
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let data = b"\x01\x02\x03\x04\x05\x06\x07\x08\xde\xad\xbe\xefhello save";
        let mut hasher = RollingChecksum::new();
        let hashed = data.iter().filter(|&&b| hasher.update_byte(b)).count();

        assert_eq!(hashed, data.len() - 4);
        assert_eq!(hasher.offset(), data.len());
        assert_eq!(hasher.value(), 0x3CD3_C0CF);
        assert_eq!(hasher.value(), calculate(data));
    }
}
