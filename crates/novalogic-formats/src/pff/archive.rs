//! PFF archive handle
//!
//! An archive is opened once, either from an owned buffer or by memory
//! mapping a file. The directory table is decoded on first use and cached for
//! the lifetime of the handle. Entry data is returned as a slice of the
//! backing store, so retrieval holds no cursor state and any number of
//! threads can extract from one handle at the same time.

use crate::cursor::ByteCursor;
use crate::pff::entry::{PffEntry, PffRecord, RecordLayout};
use crate::pff::error::{PffError, PffResult};
use crate::pff::header::PffHeader;
use memmap2::Mmap;
use parking_lot::RwLock;
use std::fmt;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Bytes an archive is read from
enum Backing {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for Backing {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data,
            Self::Mapped(map) => map,
        }
    }
}

/// An open PFF archive
pub struct PffArchive {
    data: Backing,
    header: PffHeader,
    layout: RecordLayout,
    entries: RwLock<Option<Arc<[PffEntry]>>>,
}

impl fmt::Debug for PffArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PffArchive")
            .field("len", &self.data.len())
            .field("header", &self.header)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl PffArchive {
    /// Open an archive held in memory
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> PffResult<Self> {
        Self::with_backing(Backing::Owned(data.into()))
    }

    /// Memory map and open an archive file
    pub fn open<P: AsRef<Path>>(path: P) -> PffResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        // The map is read-only; archives are not expected to change while open
        #[allow(unsafe_code)]
        let map = unsafe { Mmap::map(&file)? };

        debug!("Mapped PFF archive {} ({} bytes)", path.display(), map.len());
        Self::with_backing(Backing::Mapped(map))
    }

    fn with_backing(data: Backing) -> PffResult<Self> {
        PffHeader::check_signature(&data)?;
        let mut cursor = ByteCursor::new(&data);
        let header: PffHeader = cursor.read_record()?;
        header.validate()?;
        let layout = RecordLayout::from_record_size(header.record_size)?;

        // Reject directories that cannot fit before anything is allocated for them
        let table_start = header.record_offset as usize;
        let table_len = header.table_len().ok_or_else(|| {
            PffError::MalformedRecord(format!(
                "{} records of {} bytes overflow the address space",
                header.record_count, header.record_size
            ))
        })?;
        match table_start.checked_add(table_len) {
            Some(end) if end <= data.len() => {}
            _ => {
                return Err(PffError::TruncatedData {
                    offset: table_start,
                    expected: table_len,
                    actual: data.len().saturating_sub(table_start),
                });
            }
        }

        debug!(
            "PFF header: {} records of {} bytes at offset {}",
            header.record_count, header.record_size, header.record_offset
        );

        Ok(Self {
            data,
            header,
            layout,
            entries: RwLock::new(None),
        })
    }

    /// Parsed archive header
    pub fn header(&self) -> &PffHeader {
        &self.header
    }

    /// Directory record layout in use
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Number of directory records
    pub fn len(&self) -> usize {
        self.header.record_count as usize
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.header.record_count == 0
    }

    /// All directory entries, including deleted ones.
    ///
    /// The table is decoded on the first call; later calls return the cached
    /// list.
    pub fn entries(&self) -> PffResult<Arc<[PffEntry]>> {
        if let Some(cached) = self.entries.read().as_ref() {
            return Ok(Arc::clone(cached));
        }

        let mut slot = self.entries.write();
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let parsed: Arc<[PffEntry]> = self.read_directory()?.into();
        *slot = Some(Arc::clone(&parsed));
        Ok(parsed)
    }

    fn read_directory(&self) -> PffResult<Vec<PffEntry>> {
        let mut cursor = ByteCursor::new(&self.data);
        let start = self.header.record_offset as usize;
        let record_size = self.layout.record_size();

        let mut entries = Vec::with_capacity(self.len());
        for index in 0..self.len() {
            cursor.seek(start + index * record_size)?;
            let record = PffRecord::read(&mut cursor, self.layout)?;
            entries.push(record.into_entry(index));
        }

        debug!("Read {} PFF directory entries", entries.len());
        Ok(entries)
    }

    /// First entry whose name matches exactly
    pub fn entry(&self, name: &str) -> PffResult<Option<PffEntry>> {
        Ok(self.entries()?.iter().find(|e| e.name == name).cloned())
    }

    /// Entries that still have data
    pub fn live_entries(&self) -> PffResult<Vec<PffEntry>> {
        Ok(self
            .entries()?
            .iter()
            .filter(|e| e.is_retrievable())
            .cloned()
            .collect())
    }

    /// Data of an entry.
    ///
    /// Returns `None` for deleted entries and entries at the deleted-offset
    /// sentinel. The returned slice borrows the archive's backing store.
    pub fn contents(&self, entry: &PffEntry) -> PffResult<Option<&[u8]>> {
        if !entry.is_retrievable() {
            return Ok(None);
        }

        let mut cursor = ByteCursor::new(&self.data);
        cursor.seek(entry.offset as usize).map_err(|_| PffError::TruncatedData {
            offset: entry.offset as usize,
            expected: entry.size as usize,
            actual: 0,
        })?;
        Ok(Some(cursor.read_bytes(entry.size as usize)?))
    }

    /// Data of the first entry named `name`
    pub fn contents_by_name(&self, name: &str) -> PffResult<Option<&[u8]>> {
        match self.entry(name)? {
            Some(entry) => self.contents(&entry),
            None => Ok(None),
        }
    }
}
