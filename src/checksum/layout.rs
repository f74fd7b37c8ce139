//! Save file layout
//!
//! | Offset | Length | Field                         |
//! |--------|--------|-------------------------------|
//! | 0..8   | 8      | opaque header (hashed)        |
//! | 8..12  | 4      | stored checksum, u32 LE       |
//! | 12..   | rest   | payload (hashed)              |

use super::errors::{ChecksumError, ChecksumResult};

/// Accumulator seed
pub const CHECKSUM_SEED: u32 = 0x14D;

/// First byte of the checksum field
pub const CHECKSUM_OFFSET: usize = 8;

/// Width of the checksum field
pub const CHECKSUM_LEN: usize = 4;

/// One past the last byte of the checksum field
pub const CHECKSUM_END: usize = CHECKSUM_OFFSET + CHECKSUM_LEN;

/// Smallest buffer that holds the whole checksum field
pub const MIN_BUFFER_LEN: usize = CHECKSUM_END;

/// Whether `index` falls inside the checksum field and is skipped when hashing
#[inline]
pub fn is_checksum_byte(index: usize) -> bool {
    (CHECKSUM_OFFSET..CHECKSUM_END).contains(&index)
}

/// Fails with `OutOfRange` unless `buffer` can hold the checksum field
pub fn ensure_len(buffer: &[u8], operation: &'static str) -> ChecksumResult<()> {
    if buffer.len() < MIN_BUFFER_LEN {
        return Err(ChecksumError::out_of_range(
            operation,
            buffer.len(),
            MIN_BUFFER_LEN,
        ));
    }
    Ok(())
}

/// Reads the little-endian checksum stored at offset 8
pub fn read_stored_checksum(buffer: &[u8]) -> ChecksumResult<u32> {
    let field = buffer
        .get(CHECKSUM_OFFSET..CHECKSUM_END)
        .ok_or_else(|| ChecksumError::out_of_range("read", buffer.len(), MIN_BUFFER_LEN))?;

    let mut bytes = [0u8; CHECKSUM_LEN];
    bytes.copy_from_slice(field);
    Ok(u32::from_le_bytes(bytes))
}

/// Writes `value` little-endian at offset 8, overwriting bytes 8..12
pub fn write_checksum(buffer: &mut [u8], value: u32) -> ChecksumResult<()> {
    let len = buffer.len();
    let field = buffer
        .get_mut(CHECKSUM_OFFSET..CHECKSUM_END)
        .ok_or_else(|| ChecksumError::out_of_range("write", len, MIN_BUFFER_LEN))?;

    field.copy_from_slice(&value.to_le_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_field_bounds() {
        assert!(!is_checksum_byte(7));
        assert!(is_checksum_byte(8));
        assert!(is_checksum_byte(11));
        assert!(!is_checksum_byte(12));
    }

    #[test]
    fn test_read_little_endian() {
        let mut buffer = [0u8; 16];
        buffer[8..12].copy_from_slice(&[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(read_stored_checksum(&buffer).unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn test_write_only_touches_field() {
        let mut buffer = [0xAAu8; 14];
        write_checksum(&mut buffer, 0x12345678).unwrap();

        assert_eq!(&buffer[..8], &[0xAA; 8]);
        assert_eq!(&buffer[8..12], &[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(&buffer[12..], &[0xAA; 2]);
    }

    #[test]
    fn test_read_exact_minimum_length() {
        let buffer = [0u8; MIN_BUFFER_LEN];
        assert_eq!(read_stored_checksum(&buffer).unwrap(), 0);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let mut buffer = [0u8; 11];
        assert!(read_stored_checksum(&buffer).unwrap_err().is_out_of_range());
        assert!(write_checksum(&mut buffer, 1).unwrap_err().is_out_of_range());
        assert!(ensure_len(&buffer, "verify").is_err());
        assert_eq!(buffer, [0u8; 11]);
    }
}
