//! Conversions between domain values and their SQLite text encodings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Format of calendar dates stored as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a Decimal stored as text.
pub fn parse_decimal(value: &str, field: &'static str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| StorageError::CorruptValue {
            field,
            value: value.to_string(),
        })
}

pub fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| StorageError::CorruptValue {
        field,
        value: value.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses an RFC 3339 instant, normalized to UTC.
pub fn parse_instant(value: &str, field: &'static str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StorageError::CorruptValue {
            field,
            value: value.to_string(),
        })
}

/// Formats an instant with fixed width so text ordering matches time ordering.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
