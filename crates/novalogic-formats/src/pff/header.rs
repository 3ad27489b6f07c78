//! PFF archive header
//!
//! The header is 20 bytes, little-endian:
//!
//! ```text
//! u32 header_size   (always 20)
//! u32 signature     ("PFF3")
//! u32 record_count
//! u32 record_size   (bytes per directory record)
//! u32 record_offset (start of the directory table)
//! ```

use crate::cursor::FixedSize;
use crate::pff::error::{PffError, PffResult};
use binrw::BinRead;

/// Header size every supported archive declares
pub const HEADER_SIZE: u32 = 20;

/// `PFF3` read as a little-endian `u32`
pub const PFF3_SIGNATURE: u32 = 0x3346_4650;

/// PFF archive header
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct PffHeader {
    /// Declared header size
    pub header_size: u32,
    /// Format signature
    pub signature: u32,
    /// Number of directory records
    pub record_count: u32,
    /// Size of one directory record
    pub record_size: u32,
    /// Absolute offset of the first directory record
    pub record_offset: u32,
}

impl FixedSize for PffHeader {
    const SIZE: usize = HEADER_SIZE as usize;
}

impl PffHeader {
    /// Reject a foreign signature before the rest of the header is required.
    ///
    /// Inputs too short to hold the signature pass; the header read reports
    /// them as truncated.
    pub fn check_signature(data: &[u8]) -> PffResult<()> {
        let Some(raw) = data.get(4..8) else {
            return Ok(());
        };
        let signature = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        if signature != PFF3_SIGNATURE {
            return Err(PffError::UnsupportedFormat(format!(
                "signature {signature:#010x} (expected PFF3)"
            )));
        }
        Ok(())
    }

    /// Check header size and signature against the supported revision
    pub fn validate(&self) -> PffResult<()> {
        if self.header_size != HEADER_SIZE {
            return Err(PffError::UnsupportedFormat(format!(
                "header size {} (expected {HEADER_SIZE})",
                self.header_size
            )));
        }

        if self.signature != PFF3_SIGNATURE {
            return Err(PffError::UnsupportedFormat(format!(
                "signature {:#010x} (expected PFF3)",
                self.signature
            )));
        }

        Ok(())
    }

    /// Byte length of the whole directory table, if it fits in `usize`
    pub fn table_len(&self) -> Option<usize> {
        (self.record_count as usize).checked_mul(self.record_size as usize)
    }

    /// Signature rendered as text (`PFF3` for valid archives)
    pub fn signature_str(&self) -> String {
        String::from_utf8_lossy(&self.signature.to_le_bytes()).into_owned()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cursor::ByteCursor;

    fn header_bytes(header_size: u32, signature: &[u8; 4], count: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&header_size.to_le_bytes());
        data.extend_from_slice(signature);
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&32u32.to_le_bytes());
        data.extend_from_slice(&20u32.to_le_bytes());
        data
    }

    #[test]
    fn test_parse_header() {
        let data = header_bytes(20, b"PFF3", 7);
        let header: PffHeader = ByteCursor::new(&data).read_record().unwrap();

        assert_eq!(header.header_size, 20);
        assert_eq!(header.signature, PFF3_SIGNATURE);
        assert_eq!(header.record_count, 7);
        assert_eq!(header.record_size, 32);
        assert_eq!(header.record_offset, 20);
        assert_eq!(header.signature_str(), "PFF3");
        assert_eq!(header.table_len(), Some(224));
        header.validate().unwrap();
    }

    #[test]
    fn test_reject_bad_signature() {
        let data = header_bytes(20, b"PFF2", 0);
        let header: PffHeader = ByteCursor::new(&data).read_record().unwrap();
        assert!(matches!(
            header.validate(),
            Err(PffError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_signature_checked_on_short_input() {
        assert!(matches!(
            PffHeader::check_signature(b"\x14\0\0\0WAD2"),
            Err(PffError::UnsupportedFormat(_))
        ));
        PffHeader::check_signature(b"\x14\0\0\0PFF3").unwrap();
        PffHeader::check_signature(b"\x14\0").unwrap();
    }

    #[test]
    fn test_reject_bad_header_size() {
        let data = header_bytes(24, b"PFF3", 0);
        let header: PffHeader = ByteCursor::new(&data).read_record().unwrap();
        assert!(matches!(
            header.validate(),
            Err(PffError::UnsupportedFormat(_))
        ));
    }
}
