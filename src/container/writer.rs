//! PDB container writing
//!
//! Writing is two-phase: a layout pass computes every offset and raw
//! timestamp word from the payload sizes, then an emit pass streams the
//! bytes out in one go. The header embeds offsets, so nothing is written
//! before the layout pass completes.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::document::PdbDocument;
use super::{
    HEADER_SIZE, MAX_FILE_SIZE, MAX_UNIQUE_ID, NAME_FIELD_SIZE, RECORD_ENTRY_SIZE,
    RECORD_LIST_HEADER_SIZE,
};
use crate::common::{PalmDbError, Result};
use crate::timestamp;

/// Offsets and raw header words computed before emission
#[derive(Debug)]
struct Layout {
    create_raw: u32,
    mod_raw: u32,
    backup_raw: u32,
    sort_info_offset: u64,
    app_info_offset: u64,
    record_offsets: Vec<u64>,
}

impl PdbDocument {
    /// Serialize the document to a writable byte stream
    ///
    /// A zero `create_time` or `mod_time` is first defaulted to the
    /// current time and left set on the document. The document is then
    /// validated; nothing is written if any invariant fails.
    pub fn write<W: Write>(&mut self, sink: &mut W) -> Result<()> {
        if self.create_time.is_none() {
            self.create_time = Some(timestamp::now());
        }
        if self.mod_time.is_none() {
            self.mod_time = Some(timestamp::now());
        }
        self.validate()?;

        let layout = self.lay_out()?;
        self.emit(sink, &layout)
    }

    fn lay_out(&self) -> Result<Layout> {
        let mut total =
            (HEADER_SIZE + RECORD_LIST_HEADER_SIZE + RECORD_ENTRY_SIZE * self.records.len()) as u64;
        if self.records.is_empty() {
            // An empty record list is followed by a two-byte pad.
            total += 2;
        }

        let mut sort_info_offset = 0;
        if !self.sort_info.is_empty() {
            sort_info_offset = total;
            total += self.sort_info.len() as u64;
        }
        let mut app_info_offset = 0;
        if !self.app_info.is_empty() {
            app_info_offset = total;
            total += self.app_info.len() as u64;
        }

        let mut record_offsets = Vec::with_capacity(self.records.len());
        for record in &self.records {
            record_offsets.push(total);
            total += record.data.len() as u64;
        }

        if total > MAX_FILE_SIZE {
            return Err(PalmDbError::FileTooLarge(total));
        }

        Ok(Layout {
            create_raw: timestamp::encode(self.create_time, "create_time")?,
            mod_raw: timestamp::encode(self.mod_time, "mod_time")?,
            backup_raw: timestamp::encode(self.backup_time, "backup_time")?,
            sort_info_offset,
            app_info_offset,
            record_offsets,
        })
    }

    fn emit<W: Write>(&self, sink: &mut W, layout: &Layout) -> Result<()> {
        let mut name_raw = [0u8; NAME_FIELD_SIZE];
        name_raw[..self.name.len()].copy_from_slice(self.name.as_bytes());
        sink.write_all(&name_raw)?;

        sink.write_u16::<BigEndian>(self.attributes)?;
        sink.write_u16::<BigEndian>(self.version)?;
        sink.write_u32::<BigEndian>(layout.create_raw)?;
        sink.write_u32::<BigEndian>(layout.mod_raw)?;
        sink.write_u32::<BigEndian>(layout.backup_raw)?;
        sink.write_u32::<BigEndian>(self.mod_num)?;
        sink.write_u32::<BigEndian>(layout.app_info_offset as u32)?;
        sink.write_u32::<BigEndian>(layout.sort_info_offset as u32)?;
        sink.write_all(self.filetype.as_bytes())?;
        sink.write_all(self.creator.as_bytes())?;
        sink.write_u32::<BigEndian>(self.unique_id_seed)?;

        // A single record-list chunk; chaining is never emitted.
        sink.write_u32::<BigEndian>(0)?;
        sink.write_u16::<BigEndian>(self.records.len() as u16)?;
        for (record, &offset) in self.records.iter().zip(&layout.record_offsets) {
            sink.write_u32::<BigEndian>(offset as u32)?;
            sink.write_u32::<BigEndian>(
                (u32::from(record.attribs as u8) << 24) | (record.unique_id & MAX_UNIQUE_ID),
            )?;
        }
        if self.records.is_empty() {
            sink.write_u16::<BigEndian>(0)?;
        }

        // Sort-info first, matching the offsets the layout pass assigned.
        sink.write_all(&self.sort_info)?;
        sink.write_all(&self.app_info)?;
        for record in &self.records {
            sink.write_all(&record.data)?;
        }

        Ok(())
    }
}
