//! PDB container reading
//!
//! Reading is staged: the fixed header, then every record-list chunk, then
//! span recovery, then the payload and blob bytes. The index stores only
//! where each record starts; a record runs up to the next higher start (or
//! the end of the file), and the info blobs carve out their own spans.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use super::document::{PdbDocument, Record};
use super::{HEADER_SIZE, MAX_RECORD_COUNT, NAME_FIELD_SIZE};
use crate::common::{PalmDbError, Result};
use crate::timestamp;

/// A record-index entry before its payload has been sized and loaded
#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    offset: u64,
    attribs: i8,
    unique_id: u32,
}

/// An inclusive byte span in the file
#[derive(Debug, Clone, Copy)]
struct Span {
    start: u64,
    end: u64,
}

impl PdbDocument {
    /// Read a document from a seekable byte stream
    ///
    /// The stream is consumed from the start; the caller keeps ownership
    /// of the handle and is responsible for closing it. The returned
    /// document satisfies every invariant [`validate`](Self::validate)
    /// checks.
    pub fn read<R: Read + Seek>(source: &mut R) -> Result<PdbDocument> {
        let total_size = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;

        let (mut document, app_info_offset, sort_info_offset) = read_header(source)?;
        let entries = read_record_list(source)?;
        let (spans, sort_span, app_span) =
            recover_spans(&entries, sort_info_offset, app_info_offset, total_size)?;

        for (entry, span) in entries.iter().zip(&spans) {
            source.seek(SeekFrom::Start(span.start))?;
            let mut data = vec![0u8; (span.end - span.start + 1) as usize];
            source.read_exact(&mut data)?;
            document.records.push(Record {
                attribs: entry.attribs,
                unique_id: entry.unique_id,
                data,
            });
        }

        document.sort_info = read_blob(source, sort_span)?;
        document.app_info = read_blob(source, app_span)?;

        document.validate()?;
        Ok(document)
    }
}

fn read_header<R: Read>(source: &mut R) -> Result<(PdbDocument, u64, u64)> {
    let mut name_raw = [0u8; NAME_FIELD_SIZE];
    source.read_exact(&mut name_raw)?;
    let name = parse_text(&name_raw, "name")?;

    let attributes = source.read_u16::<BigEndian>()?;
    let version = source.read_u16::<BigEndian>()?;
    let create_time = timestamp::decode(source.read_u32::<BigEndian>()?);
    let mod_time = timestamp::decode(source.read_u32::<BigEndian>()?);
    let backup_time = timestamp::decode(source.read_u32::<BigEndian>()?);
    let mod_num = source.read_u32::<BigEndian>()?;
    let app_info_offset = u64::from(source.read_u32::<BigEndian>()?);
    let sort_info_offset = u64::from(source.read_u32::<BigEndian>()?);

    let mut code = [0u8; 4];
    source.read_exact(&mut code)?;
    let filetype = parse_text(&code, "filetype")?;
    source.read_exact(&mut code)?;
    let creator = parse_text(&code, "creator")?;
    let unique_id_seed = source.read_u32::<BigEndian>()?;

    let document = PdbDocument {
        name,
        attributes,
        version,
        filetype,
        creator,
        create_time,
        mod_time,
        backup_time,
        mod_num,
        unique_id_seed,
        records: Vec::new(),
        app_info: Vec::new(),
        sort_info: Vec::new(),
    };
    Ok((document, app_info_offset, sort_info_offset))
}

/// Decode a NUL-padded header text field
fn parse_text(raw: &[u8], field: &'static str) -> Result<String> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let bytes = &raw[..end];
    if !bytes.is_ascii() {
        return Err(PalmDbError::InvalidHeaderField {
            field,
            reason: "non-ASCII bytes".to_string(),
        });
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Collect the entries of every record-list chunk, following the chain of
/// `next_list_offset` pointers
fn read_record_list<R: Read + Seek>(source: &mut R) -> Result<Vec<IndexEntry>> {
    let mut entries = Vec::new();
    let mut chunk_offset = HEADER_SIZE as u64;
    let mut chunks = 0;

    while chunk_offset != 0 {
        source.seek(SeekFrom::Start(chunk_offset))?;
        chunk_offset = u64::from(source.read_u32::<BigEndian>()?);
        let count = source.read_u16::<BigEndian>()?;

        for _ in 0..count {
            let offset = u64::from(source.read_u32::<BigEndian>()?);
            let attribs = source.read_i8()?;
            let unique_id = source.read_u24::<BigEndian>()?;
            entries.push(IndexEntry {
                offset,
                attribs,
                unique_id,
            });
        }

        // A chain that outgrows the 16-bit index cannot be well formed;
        // this also bounds cyclic next pointers.
        chunks += 1;
        if entries.len() > MAX_RECORD_COUNT || chunks > MAX_RECORD_COUNT {
            return Err(PalmDbError::TooManyRecords(entries.len()));
        }
    }

    Ok(entries)
}

/// Recover the byte span of every record and info blob
///
/// Only start offsets are stored in the file. A shadow copy of the index
/// sorted by offset gives each record's end as the next start minus one
/// (the file end for the last). An info-blob offset falling inside a
/// record span truncates the record; a record start falling inside a blob
/// span truncates the blob; if the two blob spans still overlap, the one
/// starting later bounds the other.
fn recover_spans(
    entries: &[IndexEntry],
    sort_info_offset: u64,
    app_info_offset: u64,
    total_size: u64,
) -> Result<(Vec<Span>, Option<Span>, Option<Span>)> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&index| entries[index].offset);

    let mut spans = vec![
        Span {
            start: 0,
            end: 0
        };
        entries.len()
    ];
    for (position, &index) in order.iter().enumerate() {
        let start = entries[index].offset;
        let mut end = match order.get(position + 1) {
            Some(&next) => entries[next]
                .offset
                .checked_sub(1)
                .ok_or(PalmDbError::InvalidRecordSpan(index))?,
            None => total_size - 1,
        };

        for info_offset in [sort_info_offset, app_info_offset] {
            if info_offset != 0 && info_offset >= start && info_offset <= end {
                end = info_offset - 1;
            }
        }

        if end < start {
            return Err(PalmDbError::InvalidRecordSpan(index));
        }
        spans[index] = Span { start, end };
    }

    let mut sort_span = blob_span(sort_info_offset, total_size, entries);
    let mut app_span = blob_span(app_info_offset, total_size, entries);

    if let (Some(sort), Some(app)) = (&mut sort_span, &mut app_span) {
        if sort.start <= app.end && app.start <= sort.end {
            if app.start > sort.start {
                sort.end = app.start - 1;
            } else if sort.start > app.start {
                app.end = sort.start - 1;
            } else {
                // Identical starts; the whole span is ambiguous, read it
                // as the app-info blob.
                sort.end = sort.start - 1;
            }
        }
    }

    Ok((spans, sort_span, app_span))
}

/// Initial span of an info blob, truncated by any record starting inside it
fn blob_span(offset: u64, total_size: u64, entries: &[IndexEntry]) -> Option<Span> {
    if offset == 0 {
        return None;
    }
    let mut span = Span {
        start: offset,
        end: total_size - 1,
    };
    for entry in entries {
        if entry.offset > span.start && entry.offset <= span.end {
            span.end = entry.offset - 1;
        }
    }
    Some(span)
}

fn read_blob<R: Read + Seek>(source: &mut R, span: Option<Span>) -> Result<Vec<u8>> {
    let Some(span) = span else {
        return Ok(Vec::new());
    };
    if span.end < span.start {
        return Ok(Vec::new());
    }
    source.seek(SeekFrom::Start(span.start))?;
    let mut blob = vec![0u8; (span.end - span.start + 1) as usize];
    source.read_exact(&mut blob)?;
    Ok(blob)
}
