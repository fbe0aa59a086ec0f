//! PalmDoc Database (PDB) container
//!
//! A PDB file is a 72-byte big-endian header, a record index of one or
//! more chained chunks of 8-byte entries, two optional opaque blobs
//! (sort-info and app-info), and the raw record payloads. The index only
//! stores where each record starts; sizes are recovered on read from the
//! gaps between offsets. Payloads are opaque to the container; callers
//! that want the classic ebook layout run them through [`crate::lz77`].

mod document;
mod reader;
mod validate;
mod writer;

pub use document::{PdbDocument, Record};
pub use validate::validate;

/// Size of the fixed header
pub const HEADER_SIZE: usize = 72;

/// Size of the record-list header that follows the fixed header
pub const RECORD_LIST_HEADER_SIZE: usize = 6;

/// Size of one record-index entry
pub const RECORD_ENTRY_SIZE: usize = 8;

/// Width of the NUL-padded name field
pub const NAME_FIELD_SIZE: usize = 32;

/// Largest record count the 16-bit index can carry
pub const MAX_RECORD_COUNT: usize = 0xFFFF;

/// Largest serializable file size (2 GiB - 1)
pub const MAX_FILE_SIZE: u64 = 0x7FFF_FFFF;

/// Largest value a record unique id may take (24 bits)
pub const MAX_UNIQUE_ID: u32 = 0x00FF_FFFF;
