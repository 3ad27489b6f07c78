//! PFF archive reader
//!
//! PFF archives bundle game assets behind a 20-byte header and a directory
//! table of fixed-size records. Only the `PFF3` revision is supported; the
//! directory record size varies between titles and is taken from the header.
//!
//! # Usage
//!
//! ```rust,no_run
//! use novalogic_formats::pff::PffArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = PffArchive::open("RESOURCE.PFF")?;
//! for entry in archive.entries()?.iter() {
//!     if let Some(data) = archive.contents(entry)? {
//!         println!("{} ({} bytes)", entry.name, data.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod archive;
mod entry;
mod error;
mod header;

pub use archive::PffArchive;
pub use entry::{
    DELETED_OFFSET, NAME_LEN, PffEntry, PffRecord, RecordLayout, RecordV32, RecordV36,
};
pub use error::{PffError, PffResult};
pub use header::{HEADER_SIZE, PFF3_SIGNATURE, PffHeader};
