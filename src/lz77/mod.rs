//! PalmDoc LZ77 codec
//!
//! This module implements the byte-oriented LZ77 variant used to compress
//! records in PalmDoc and MOBI databases. Input is processed in 4096-byte
//! blocks and the output stream mixes four token kinds, identified by the
//! leading byte:
//!
//! | Leading byte  | Token |
//! |---------------|-------|
//! | `0x00`        | literal NUL |
//! | `0x01..=0x08` | chunk of that many verbatim bytes |
//! | `0x09..=0x7F` | literal ASCII byte |
//! | `0x80..=0xBF` | two-byte back-reference (11-bit distance, 3-10 byte length) |
//! | `0xC0..=0xFF` | space followed by the byte with its high bit cleared |

mod compress;
mod decompress;

pub use compress::compress;
pub use decompress::decompress;

/// Compression block size; each block is encoded independently
pub const BLOCK_SIZE: usize = 4096;

/// Back-reference search window (distances are encoded in 11 bits)
pub const WINDOW_SIZE: usize = 1024;

/// Shortest run a back-reference can encode
pub const MIN_MATCH_LENGTH: usize = 3;

/// Longest run a back-reference can encode
pub const MAX_MATCH_LENGTH: usize = 10;
