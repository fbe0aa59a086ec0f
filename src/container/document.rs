//! In-memory model of a PDB file

use chrono::{DateTime, Utc};

/// One database record: a flag byte, a 24-bit unique id, and an opaque
/// payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Application-defined flag byte
    pub attribs: i8,
    /// Identifier unique within the document; at most 24 bits wide
    pub unique_id: u32,
    /// Raw payload; must be non-empty when the document is written
    pub data: Vec<u8>,
}

impl Record {
    /// Create a record with a zero flag byte
    pub fn new(unique_id: u32, data: Vec<u8>) -> Self {
        Record {
            attribs: 0,
            unique_id,
            data,
        }
    }
}

/// The parsed contents of a PDB file
///
/// Produced by [`PdbDocument::read`] or assembled field by field, and
/// consumed by [`PdbDocument::write`]. All payload bytes are held in
/// memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdbDocument {
    /// Database name, printable ASCII, at most 32 bytes
    pub name: String,
    /// Attribute bitfield, application-defined
    pub attributes: u16,
    /// Application-specific format version
    pub version: u16,
    /// Four-character payload type code, e.g. `"BOOK"`
    pub filetype: String,
    /// Four-character creating-application code, e.g. `"MOBI"`
    pub creator: String,
    /// Creation time; required when writing
    pub create_time: Option<DateTime<Utc>>,
    /// Last-modification time; required when writing
    pub mod_time: Option<DateTime<Utc>>,
    /// Last-backup time; `None` when never backed up
    pub backup_time: Option<DateTime<Utc>>,
    /// Modification counter, application-defined
    pub mod_num: u32,
    /// Seed the creating application used for allocating unique ids
    pub unique_id_seed: u32,
    /// Records in emission order
    pub records: Vec<Record>,
    /// Application-info blob; empty means absent
    pub app_info: Vec<u8>,
    /// Sort-info blob; empty means absent
    pub sort_info: Vec<u8>,
}

impl PdbDocument {
    /// Create an empty document with the given identity codes
    ///
    /// Timestamps are left unset; [`write`](PdbDocument::write) fills
    /// `create_time` and `mod_time` with the current time if still unset.
    pub fn new(name: &str, filetype: &str, creator: &str) -> Self {
        PdbDocument {
            name: name.to_owned(),
            attributes: 0,
            version: 0,
            filetype: filetype.to_owned(),
            creator: creator.to_owned(),
            create_time: None,
            mod_time: None,
            backup_time: None,
            mod_num: 0,
            unique_id_seed: 0,
            records: Vec::new(),
            app_info: Vec::new(),
            sort_info: Vec::new(),
        }
    }
}
