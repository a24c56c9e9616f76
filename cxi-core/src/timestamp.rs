//! Fixed-width timestamp validation.
//!
//! Timestamps are checked against the 24-byte pattern
//! `YYYY-MM-DDThh:mm:ss±hhmm` (e.g. `2013-01-12T08:00:00+0100`) before they
//! are persisted. Only character classes at fixed offsets are checked;
//! calendar correctness (month 13, day 32) is deliberately out of scope.

use crate::error::{Error, Result};

const TIMESTAMP_LEN: usize = 24;

/// Returns true if `value` matches the fixed-width ISO 8601 pattern.
#[must_use]
pub fn is_iso8601(value: &str) -> bool {
    let b = value.as_bytes();
    if b.len() != TIMESTAMP_LEN {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
    digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b'T'
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16)
        && b[16] == b':'
        && digits(17..19)
        && (b[19] == b'+' || b[19] == b'-')
        && digits(20..24)
}

/// Validates a timestamp, returning it unchanged on success.
///
/// # Errors
/// Returns [`Error::InvalidTimestamp`] if the pattern does not match.
pub fn validate_timestamp(value: &str) -> Result<&str> {
    if is_iso8601(value) {
        Ok(value)
    } else {
        Err(Error::InvalidTimestamp(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reference_timestamp() {
        assert!(is_iso8601("2013-01-12T08:00:00+0100"));
        assert!(is_iso8601("1999-12-31T23:59:59-0800"));
    }

    #[test]
    fn rejects_space_separator() {
        assert!(!is_iso8601("2013-01-12 08:00:00+0100"));
    }

    #[test]
    fn rejects_two_digit_year() {
        assert!(!is_iso8601("13-01-12T08:00:00+0100"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_iso8601(""));
        assert!(!is_iso8601("2013-01-12T08:00:00+01000"));
    }

    #[test]
    fn calendar_correctness_is_not_checked() {
        // Month 13 still matches the character classes.
        assert!(is_iso8601("2013-13-12T08:00:00+0100"));
    }

    #[test]
    fn validate_reports_the_offending_value() {
        let err = validate_timestamp("not a date").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(ref s) if s == "not a date"));
    }
}
