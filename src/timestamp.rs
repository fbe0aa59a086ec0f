//! Dual-epoch PalmOS timestamp handling
//!
//! PDB headers store timestamps as 32-bit big-endian words with two epoch
//! conventions in the wild: a value with the high bit clear counts seconds
//! from the Unix epoch (1970-01-01), a value with the high bit set counts
//! seconds from the Palm epoch (1904-01-01). Zero means "no timestamp".
//! The writer always emits the Unix encoding.

use chrono::{DateTime, TimeZone, Utc};

use crate::common::{PalmDbError, Result};

/// Seconds between the Palm epoch (1904-01-01) and the Unix epoch (1970-01-01)
pub const PALM_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Decode a raw header timestamp into a UTC instant
///
/// Returns `None` for the zero timestamp.
pub fn decode(raw: u32) -> Option<DateTime<Utc>> {
    if raw == 0 {
        return None;
    }
    let unix_secs = if raw & 0x8000_0000 != 0 {
        i64::from(raw) - PALM_EPOCH_OFFSET
    } else {
        i64::from(raw)
    };
    Utc.timestamp_opt(unix_secs, 0).single()
}

/// Encode a UTC instant as the raw header word
///
/// `None` encodes as zero. Instants before 1970 have no unsigned Unix
/// representation and are rejected; `field` names the header field in the
/// resulting error.
pub fn encode(time: Option<DateTime<Utc>>, field: &'static str) -> Result<u32> {
    let Some(time) = time else {
        return Ok(0);
    };
    let secs = time.timestamp();
    if secs < 0 || secs > i64::from(u32::MAX) {
        return Err(PalmDbError::TimestampOutOfRange(field));
    }
    Ok(secs as u32)
}

/// Whether an instant lies in the range both epoch encodings can cover
///
/// The valid range is `[1904-01-01 00:00:00, 2038-01-19 03:14:07)`.
pub fn in_range(time: DateTime<Utc>) -> bool {
    let secs = time.timestamp();
    secs >= -PALM_EPOCH_OFFSET && secs < i64::from(i32::MAX)
}

/// The current time at the one-second resolution the header stores
pub(crate) fn now() -> DateTime<Utc> {
    let wall = Utc::now();
    Utc.timestamp_opt(wall.timestamp(), 0).single().unwrap_or(wall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_zero() {
        assert_eq!(decode(0), None);
    }

    #[test]
    fn test_decode_unix_encoding() {
        let want = Utc.with_ymd_and_hms(2018, 11, 1, 5, 1, 5).unwrap();
        assert_eq!(decode(want.timestamp() as u32), Some(want));
    }

    #[test]
    fn test_decode_palm_encoding() {
        // 0x8000_0000 seconds after 1904-01-01
        let want = Utc.with_ymd_and_hms(1972, 1, 19, 3, 14, 8).unwrap();
        assert_eq!(decode(0x8000_0000), Some(want));

        let unix = Utc.timestamp_opt(100_000_000, 0).unwrap();
        let raw = (100_000_000_i64 + PALM_EPOCH_OFFSET) as u32;
        assert!(raw & 0x8000_0000 != 0);
        assert_eq!(decode(raw), Some(unix));
    }

    #[test]
    fn test_encode_is_unix() {
        let time = Utc.with_ymd_and_hms(2018, 11, 1, 5, 1, 6).unwrap();
        let raw = encode(Some(time), "mod_time").unwrap();
        assert_eq!(i64::from(raw), time.timestamp());
        assert_eq!(encode(None, "backup_time").unwrap(), 0);
    }

    #[test]
    fn test_encode_rejects_pre_1970() {
        let time = Utc.with_ymd_and_hms(1950, 6, 1, 0, 0, 0).unwrap();
        let err = encode(Some(time), "create_time").unwrap_err();
        assert!(matches!(
            err,
            PalmDbError::TimestampOutOfRange("create_time")
        ));
    }

    #[test]
    fn test_in_range_bounds() {
        let palm_epoch = Utc.with_ymd_and_hms(1904, 1, 1, 0, 0, 0).unwrap();
        assert!(in_range(palm_epoch));
        assert!(!in_range(palm_epoch - chrono::Duration::seconds(1)));

        let last = Utc.timestamp_opt(i64::from(i32::MAX) - 1, 0).unwrap();
        assert!(in_range(last));
        assert!(!in_range(Utc.timestamp_opt(i64::from(i32::MAX), 0).unwrap()));
    }

    #[test]
    fn test_round_trip_both_epochs() {
        // A Palm-encoded instant re-encodes in the low (Unix) form but
        // decodes to the same second.
        let raw_palm = 0x8300_0000_u32;
        let instant = decode(raw_palm).unwrap();
        let raw_unix = encode(Some(instant), "create_time").unwrap();
        assert!(raw_unix & 0x8000_0000 == 0);
        assert_eq!(decode(raw_unix), Some(instant));
    }
}
