//! Directory records and the normalised entry view
//!
//! Titles shipped several directory record shapes under the same `PFF3`
//! signature. Each shape is decoded into its own record type and then
//! folded into a single [`PffEntry`] that callers work with.
//!
//! | Record size | Layout |
//! |---|---|
//! | 32 | `u32 deleted, u32 offset, u32 size, u32 modified, [u8; 15] name, u8 reserved` |
//! | 36 | 32-byte record followed by a `u32` checksum |
//! | > 36 | 32-byte record, trailing bytes ignored |

use crate::cursor::{ByteCursor, FixedSize, fixed_str};
use crate::pff::error::{PffError, PffResult};
use binrw::BinRead;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Offset value marking a removed entry
pub const DELETED_OFFSET: u32 = u32::MAX;

/// Length of the embedded name field
pub const NAME_LEN: usize = 15;

/// Base 32-byte directory record
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct RecordV32 {
    /// Non-zero when the entry is tombstoned
    pub deleted: u32,
    /// Absolute offset of the entry data
    pub offset: u32,
    /// Entry data length
    pub size: u32,
    /// Modification time, seconds since the Unix epoch
    pub modified: u32,
    /// NUL-padded ASCII name
    pub name: [u8; NAME_LEN],
    /// Unused
    pub reserved: u8,
}

impl FixedSize for RecordV32 {
    const SIZE: usize = 32;
}

/// 36-byte directory record carrying a checksum
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct RecordV36 {
    /// Shared fields
    pub base: RecordV32,
    /// Checksum of the entry data as stored by the packer
    pub checksum: u32,
}

impl FixedSize for RecordV36 {
    const SIZE: usize = 36;
}

/// Directory record shape selected by the header's record size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// 32-byte records
    Standard,
    /// 36-byte records with a checksum
    Checksummed,
    /// Unknown larger records; only the 32-byte prefix is understood
    Extended(usize),
}

impl RecordLayout {
    /// Pick the layout for a record size
    pub fn from_record_size(record_size: u32) -> PffResult<Self> {
        match record_size as usize {
            size if size == RecordV32::SIZE => Ok(Self::Standard),
            size if size == RecordV36::SIZE => Ok(Self::Checksummed),
            size if size > RecordV32::SIZE => {
                warn!(
                    "Unknown PFF record size {}, ignoring {} trailing bytes per record",
                    size,
                    size - RecordV32::SIZE
                );
                Ok(Self::Extended(size))
            }
            size => Err(PffError::MalformedRecord(format!(
                "record size {size} is smaller than the {} byte minimum",
                RecordV32::SIZE
            ))),
        }
    }

    /// Bytes per record
    pub fn record_size(self) -> usize {
        match self {
            Self::Standard => RecordV32::SIZE,
            Self::Checksummed => RecordV36::SIZE,
            Self::Extended(size) => size,
        }
    }
}

/// A decoded directory record in its on-disk shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PffRecord {
    /// 32-byte record
    Standard(RecordV32),
    /// 36-byte record
    Checksummed(RecordV36),
    /// Larger record of unknown shape
    Extended(RecordV32),
}

impl PffRecord {
    /// Read one record of the given layout; the cursor ends after the whole record
    pub fn read(cursor: &mut ByteCursor<'_>, layout: RecordLayout) -> PffResult<Self> {
        let record = match layout {
            RecordLayout::Standard => Self::Standard(cursor.read_record()?),
            RecordLayout::Checksummed => Self::Checksummed(cursor.read_record()?),
            RecordLayout::Extended(size) => {
                let base = cursor.read_record()?;
                cursor.skip(size - RecordV32::SIZE)?;
                Self::Extended(base)
            }
        };
        Ok(record)
    }

    /// Fields shared by every layout
    pub fn base(&self) -> &RecordV32 {
        match self {
            Self::Standard(base) | Self::Extended(base) => base,
            Self::Checksummed(record) => &record.base,
        }
    }

    /// Stored checksum, for layouts that have one
    pub fn checksum(&self) -> Option<u32> {
        match self {
            Self::Checksummed(record) => Some(record.checksum),
            Self::Standard(_) | Self::Extended(_) => None,
        }
    }

    /// Fold into the logical entry view
    pub fn into_entry(self, index: usize) -> PffEntry {
        let checksum = self.checksum();
        let base = self.base();
        PffEntry {
            index,
            name: fixed_str(&base.name),
            deleted: base.deleted != 0,
            offset: base.offset,
            size: base.size,
            modified: base.modified,
            checksum,
        }
    }
}

/// Logical archive entry, independent of the record layout it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PffEntry {
    /// Position in the directory table
    pub index: usize,
    /// File name, at most 15 bytes
    pub name: String,
    /// Tombstone flag
    pub deleted: bool,
    /// Absolute data offset
    pub offset: u32,
    /// Data length
    pub size: u32,
    /// Modification time, seconds since the Unix epoch
    pub modified: u32,
    /// Data checksum, when the record layout carries one
    pub checksum: Option<u32>,
}

impl PffEntry {
    /// Whether the entry has data that can be retrieved
    pub fn is_retrievable(&self) -> bool {
        !self.deleted && self.offset != DELETED_OFFSET
    }

    /// Modification time as a UTC timestamp
    pub fn modified_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.modified), 0)
    }

    /// Extension after the last dot, without the dot
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}
