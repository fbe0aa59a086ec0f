//! palmdb - PalmDoc Database (PDB) container and record codec
//!
//! This crate reads and writes the PDB container used by PalmDoc, PRC,
//! and MOBI ebooks, and implements the PalmDoc LZ77 byte codec used to
//! compress the records inside those files. Both halves are byte-exact:
//! the container reconstructs record boundaries that the format never
//! stores, and the codec round-trips arbitrary buffers through the
//! four-token PalmDoc wire encoding.
//!
//! The container treats every record payload, app-info, and sort-info
//! blob as an opaque byte buffer; callers own their meaning and can feed
//! individual payloads through the codec themselves.
//!
//! # Example - reading
//!
//! ```no_run
//! use std::fs::File;
//! use palmdb::PdbDocument;
//!
//! let mut file = File::open("book.mobi")?;
//! let doc = PdbDocument::read(&mut file)?;
//! println!("{} ({}/{}), {} records", doc.name, doc.filetype, doc.creator, doc.records.len());
//!
//! // MOBI text records are PalmDoc-compressed.
//! let text = palmdb::decompress(&doc.records[1].data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - building and writing
//!
//! ```
//! use palmdb::{PdbDocument, Record};
//!
//! let mut doc = PdbDocument::new("quickstart", "BOOK", "MOBI");
//! doc.records.push(Record::new(0, palmdb::compress(b"it was a dark and stormy night")));
//! let bytes = palmdb::write_bytes(&mut doc)?;
//!
//! let back = palmdb::read_bytes(&bytes)?;
//! assert_eq!(back.records.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod common;
pub mod container;
pub mod error;
pub mod lz77;
pub mod timestamp;

// Re-export commonly used types
pub use common::{PalmDbError, Result};
pub use container::{validate, PdbDocument, Record};
pub use lz77::{compress, decompress};

/// Parse a PDB file held in memory
///
/// Convenience wrapper over [`PdbDocument::read`] for callers that
/// already have the whole file in a buffer.
pub fn read_bytes(data: &[u8]) -> Result<PdbDocument> {
    PdbDocument::read(&mut std::io::Cursor::new(data))
}

/// Serialize a document into a fresh buffer
///
/// Takes `&mut` because zero timestamps are defaulted and written back,
/// exactly as [`PdbDocument::write`] does.
pub fn write_bytes(document: &mut PdbDocument) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    document.write(&mut out)?;
    Ok(out)
}
