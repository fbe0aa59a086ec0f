//! Common types for PalmDoc Database handling
//!
//! This module defines the error type and result alias shared by the
//! container and codec halves of the crate. It uses thiserror for
//! ergonomic error handling and provides context-specific variants.

use thiserror::Error;

/// Error type for palmdb operations
#[derive(Debug, Error)]
pub enum PalmDbError {
    /// Size or character-set violation on a header text field
    #[error("invalid {field}: {reason}")]
    InvalidHeaderField {
        /// Which header field was rejected
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Timestamp zero where forbidden, or outside the representable range
    #[error("{0} timestamp out of range")]
    TimestampOutOfRange(&'static str),

    /// Two records share a unique id
    #[error("duplicate record unique id {0:#08x}")]
    DuplicateUniqueId(u32),

    /// Record unique id does not fit in 24 bits
    #[error("record unique id {0:#x} does not fit in 24 bits")]
    UniqueIdTooLarge(u32),

    /// Record with a zero-length payload
    #[error("record {0} has an empty payload")]
    EmptyRecord(usize),

    /// More records than a record list can index
    #[error("too many records: {0} (at most 65535)")]
    TooManyRecords(usize),

    /// Serialized file would exceed 2 GiB - 1 bytes
    #[error("serialized size {0} exceeds the 2 GiB file limit")]
    FileTooLarge(u64),

    /// Compressed stream ended in the middle of a token
    #[error("truncated token at compressed offset {0}")]
    TruncatedToken(usize),

    /// Back-reference reaching past the start of the decompressed output
    #[error("back-reference distance {distance} with only {available} bytes decompressed")]
    DistancePastStart {
        /// Distance the token asked to copy from
        distance: usize,
        /// Bytes of output produced so far
        available: usize,
    },

    /// Token no conforming encoder produces
    #[error("bad token at compressed offset {0}")]
    BadToken(usize),

    /// Record span reconstructed from the index is inconsistent
    #[error("record {0} has an inconsistent span in the record index")]
    InvalidRecordSpan(usize),

    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for palmdb operations
pub type Result<T> = std::result::Result<T, PalmDbError>;
