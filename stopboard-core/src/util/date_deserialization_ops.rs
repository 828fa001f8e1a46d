use chrono::NaiveDate;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

use super::CodecError;

/// date format used throughout GTFS text tables, such as `20251126`.
pub const GTFS_DATE_FORMAT: &str = "%Y%m%d";
/// date format accepted from users on the command line.
pub const APP_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_gtfs_date(date_str: &str) -> Result<NaiveDate, CodecError> {
    let trimmed = date_str.trim();
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidGtfsDate(date_str.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, GTFS_DATE_FORMAT)
        .map_err(|_| CodecError::InvalidGtfsDate(date_str.to_string()))
}

pub fn format_gtfs_date(date: &NaiveDate) -> String {
    date.format(GTFS_DATE_FORMAT).to_string()
}

pub fn parse_app_date(date_str: &str) -> Result<NaiveDate, CodecError> {
    NaiveDate::parse_from_str(date_str.trim(), APP_DATE_FORMAT)
        .map_err(|_| CodecError::InvalidAppDate(date_str.to_string()))
}

pub fn deserialize_gtfs_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let date_str: String = String::deserialize(deserializer)?;
    parse_gtfs_date(&date_str).map_err(|e| D::Error::custom(e.to_string()))
}

pub fn serialize_gtfs_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_gtfs_date(date))
}
