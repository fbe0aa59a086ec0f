//! Document validation
//!
//! [`PdbDocument::write`] runs these checks before emitting a single byte;
//! callers can also run them directly to vet a document they assembled by
//! hand. The first violated invariant wins.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::document::PdbDocument;
use super::{MAX_RECORD_COUNT, MAX_UNIQUE_ID, NAME_FIELD_SIZE};
use crate::common::{PalmDbError, Result};
use crate::timestamp;

/// Check every document invariant, reporting the first violation
pub fn validate(document: &PdbDocument) -> Result<()> {
    check_code(&document.filetype, "filetype")?;
    check_code(&document.creator, "creator")?;
    check_name(&document.name)?;

    check_time(document.create_time, false, "create_time")?;
    check_time(document.mod_time, false, "mod_time")?;
    check_time(document.backup_time, true, "backup_time")?;

    if document.records.len() > MAX_RECORD_COUNT {
        return Err(PalmDbError::TooManyRecords(document.records.len()));
    }

    let mut seen = HashSet::with_capacity(document.records.len());
    for (index, record) in document.records.iter().enumerate() {
        if record.unique_id > MAX_UNIQUE_ID {
            return Err(PalmDbError::UniqueIdTooLarge(record.unique_id));
        }
        if !seen.insert(record.unique_id) {
            return Err(PalmDbError::DuplicateUniqueId(record.unique_id));
        }
        if record.data.is_empty() {
            return Err(PalmDbError::EmptyRecord(index));
        }
    }

    Ok(())
}

impl PdbDocument {
    /// Check every document invariant, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        validate(self)
    }
}

fn check_code(value: &str, field: &'static str) -> Result<()> {
    if value.len() != 4 {
        return Err(PalmDbError::InvalidHeaderField {
            field,
            reason: format!("{} bytes, expected exactly 4", value.len()),
        });
    }
    check_text(value, field)
}

fn check_name(name: &str) -> Result<()> {
    if name.len() > NAME_FIELD_SIZE {
        return Err(PalmDbError::InvalidHeaderField {
            field: "name",
            reason: format!("{} bytes, at most {} allowed", name.len(), NAME_FIELD_SIZE),
        });
    }
    check_text(name, "name")
}

fn check_text(value: &str, field: &'static str) -> Result<()> {
    if !value.is_ascii() {
        return Err(PalmDbError::InvalidHeaderField {
            field,
            reason: "non-ASCII bytes".to_string(),
        });
    }
    // The on-disk fields are NUL-padded; an embedded NUL would be trimmed
    // away on the next read.
    if value.bytes().any(|byte| byte == 0) {
        return Err(PalmDbError::InvalidHeaderField {
            field,
            reason: "embedded NUL byte".to_string(),
        });
    }
    Ok(())
}

fn check_time(time: Option<DateTime<Utc>>, zero_ok: bool, field: &'static str) -> Result<()> {
    match time {
        None if zero_ok => Ok(()),
        None => Err(PalmDbError::TimestampOutOfRange(field)),
        Some(time) if timestamp::in_range(time) => Ok(()),
        Some(_) => Err(PalmDbError::TimestampOutOfRange(field)),
    }
}
