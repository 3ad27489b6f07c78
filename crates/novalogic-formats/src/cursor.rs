//! Bounds-checked little-endian reader over an in-memory buffer
//!
//! Every reader in this crate drives a [`ByteCursor`]. Reads never zero-fill:
//! asking for more bytes than remain is a [`CursorError::TruncatedData`].
//! Fixed-size records are decoded with `binrw` after the cursor has checked
//! that the whole record is present.

use binrw::BinRead;
use std::io::Cursor;
use thiserror::Error;

/// Cursor operation result type
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors raised by [`ByteCursor`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CursorError {
    /// Buffer ended before a field or record was complete
    #[error("Truncated data at offset {offset}: expected {expected} bytes, {actual} available")]
    TruncatedData {
        /// Offset the read started at
        offset: usize,
        /// Bytes the read needed
        expected: usize,
        /// Bytes remaining in the buffer
        actual: usize,
    },

    /// A record was present but `binrw` rejected its contents
    #[error("Invalid record at offset {offset}: {reason}")]
    InvalidRecord {
        /// Offset of the record
        offset: usize,
        /// Description from the record decoder
        reason: String,
    },
}

/// On-disk size of a fixed-layout record
pub trait FixedSize {
    /// Size in bytes
    const SIZE: usize;
}

/// Sequential reader with an explicit position
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current absolute position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left after the current position
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Move to an absolute offset (the end of the buffer is a valid target)
    pub fn seek(&mut self, offset: usize) -> CursorResult<()> {
        if offset > self.data.len() {
            return Err(CursorError::TruncatedData {
                offset,
                expected: 0,
                actual: 0,
            });
        }
        self.position = offset;
        Ok(())
    }

    /// Advance past `count` bytes without reading them
    pub fn skip(&mut self, count: usize) -> CursorResult<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Borrow the next `count` bytes
    pub fn read_bytes(&mut self, count: usize) -> CursorResult<&'a [u8]> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(CursorError::TruncatedData {
                offset: self.position,
                expected: count,
                actual: remaining,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..self.position])
    }

    /// Copy the next `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a byte
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> CursorResult<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> CursorResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian `i16`
    pub fn read_i16(&mut self) -> CursorResult<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Read a little-endian `i32`
    pub fn read_i32(&mut self) -> CursorResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Decode a fixed-size record after checking it is fully present
    pub fn read_record<T>(&mut self) -> CursorResult<T>
    where
        T: FixedSize + for<'b> BinRead<Args<'b> = ()>,
    {
        let offset = self.position;
        let bytes = self.read_bytes(T::SIZE)?;
        T::read_options(&mut Cursor::new(bytes), binrw::Endian::Little, ()).map_err(|e| {
            CursorError::InvalidRecord {
                offset,
                reason: e.to_string(),
            }
        })
    }

    /// Byte length of `count` records of `record_size` bytes.
    ///
    /// Fails when the records cannot fit in what is left of the buffer, so
    /// callers can reject hostile counts before allocating for them.
    pub fn checked_len(&self, count: usize, record_size: usize) -> CursorResult<usize> {
        let remaining = self.remaining();
        match count.checked_mul(record_size) {
            Some(total) if total <= remaining => Ok(total),
            total => Err(CursorError::TruncatedData {
                offset: self.position,
                expected: total.unwrap_or(usize::MAX),
                actual: remaining,
            }),
        }
    }
}

/// Decode a fixed-length ASCII field, truncating at the first NUL.
///
/// Bytes outside ASCII become `?`, so the result never has more bytes than
/// the field.
pub fn fixed_str(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::BinRead;

    #[derive(BinRead, Debug, PartialEq, Eq)]
    #[br(little)]
    struct Pair {
        a: u16,
        b: i32,
    }

    impl FixedSize for Pair {
        const SIZE: usize = 6;
    }

    #[test]
    fn test_little_endian_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0x7F];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u16().unwrap(), 0x0201);
        assert_eq!(cursor.read_u16().unwrap(), 0x0403);
        assert_eq!(cursor.read_i16().unwrap(), -1);
        assert_eq!(cursor.read_i32().unwrap(), -2);
        assert_eq!(cursor.read_u8().unwrap(), 0x7F);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_is_truncated() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.read_u16().unwrap();

        let err = cursor.read_u32().unwrap_err();
        assert_eq!(
            err,
            CursorError::TruncatedData {
                offset: 2,
                expected: 4,
                actual: 1
            }
        );
        // A failed read does not move the cursor
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 3);
    }

    #[test]
    fn test_seek_and_skip() {
        let data = [0u8, 1, 2, 3, 4, 5];
        let mut cursor = ByteCursor::new(&data);

        cursor.seek(4).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 4);
        cursor.seek(6).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.seek(7).is_err());

        cursor.seek(0).unwrap();
        cursor.skip(2).unwrap();
        assert_eq!(cursor.position(), 2);
        assert!(cursor.skip(5).is_err());
    }

    #[test]
    fn test_read_record() {
        let data = [0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
        let mut cursor = ByteCursor::new(&data);
        let pair: Pair = cursor.read_record().unwrap();
        assert_eq!(pair, Pair { a: 0x1234, b: -1 });
        assert_eq!(cursor.position(), 6);

        assert!(matches!(
            cursor.read_record::<Pair>(),
            Err(CursorError::TruncatedData { expected: 6, actual: 1, .. })
        ));
    }

    #[test]
    fn test_checked_len() {
        let data = [0u8; 64];
        let cursor = ByteCursor::new(&data);
        assert_eq!(cursor.checked_len(8, 8).unwrap(), 64);
        assert!(cursor.checked_len(9, 8).is_err());
        assert!(matches!(
            cursor.checked_len(usize::MAX, 2),
            Err(CursorError::TruncatedData { expected: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_fixed_str() {
        assert_eq!(fixed_str(b"FOO\0\0\0\0\0"), "FOO");
        assert_eq!(fixed_str(b"ABC\0DEF"), "ABC");
        assert_eq!(fixed_str(b"FULLNAME"), "FULLNAME");
        assert_eq!(fixed_str(b"\0\0"), "");
        assert_eq!(fixed_str(b"A\xFFB\x80\0\xFF"), "A?B?");
        assert_eq!(fixed_str(&[0xFF; 15]).len(), 15);
    }
}
