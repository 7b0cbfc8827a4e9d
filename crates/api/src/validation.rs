//! Date parameter validation for the temperature range routes

use chrono::NaiveDate;
use climate_storage::DATE_FORMAT;
use thiserror::Error;

/// Rejections for caller-supplied dates.
///
/// These are reported to the client as a JSON `{"error": ...}` body with
/// status 200, never as an HTTP error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Date must be in YYYY-MM-DD format")]
    Malformed,
    #[error("End Date must be later than start date")]
    EndNotAfterStart,
}

/// Parse a strict, zero-padded `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shape_ok {
        return Err(DateRangeError::Malformed);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DateRangeError::Malformed)
}

/// Check a `start` date and an optional `end` date.
///
/// Both must be well-formed, and `end` must sort strictly after `start`.
/// Zero-padded ISO dates compare the same as strings and as dates.
pub fn validate_range(start: &str, end: Option<&str>) -> Result<(), DateRangeError> {
    parse_date(start)?;

    if let Some(end) = end {
        parse_date(end)?;
        if start >= end {
            return Err(DateRangeError::EndNotAfterStart);
        }
    }

    Ok(())
}
