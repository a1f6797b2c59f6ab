use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ShoplensError;
use crate::order::COL_PURCHASE_TIMESTAMP;

/// Naive date-time layouts accepted besides RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse an order purchase timestamp.
///
/// RFC 3339 values are converted to UTC and the offset dropped, so every
/// result lives on the same naive timeline. Bare dates map to midnight.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ShoplensError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ShoplensError::parse(
            COL_PURCHASE_TIMESTAMP,
            raw,
            "missing timestamp",
        ));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }

    Err(ShoplensError::parse(
        COL_PURCHASE_TIMESTAMP,
        raw,
        "not a recognized date/time",
    ))
}
