use serde::{Deserialize, Serialize};
use stopboard_core::util::date_deserialization_ops::{format_gtfs_date, parse_gtfs_date};

use crate::schedule::{materialize::ScheduleEntry, ScheduleError};

/// flat csv rendition of a schedule entry. optional columns are always present
/// and left empty when unset, so every row has the same width.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCsvRow {
    trip_id: String,
    stop_id: String,
    arrival: i64,
    departure: i64,
    headsign: String,
    direction: u8,
    date: String,
    train_number: Option<String>,
    direction_label: Option<String>,
}

impl From<&ScheduleEntry> for ScheduleCsvRow {
    fn from(entry: &ScheduleEntry) -> Self {
        ScheduleCsvRow {
            trip_id: entry.trip_id.clone(),
            stop_id: entry.stop_id.clone(),
            arrival: entry.arrival,
            departure: entry.departure,
            headsign: entry.headsign.clone(),
            direction: entry.direction,
            date: format_gtfs_date(&entry.date),
            train_number: entry.train_number.clone(),
            direction_label: entry.direction_label.clone(),
        }
    }
}

impl TryFrom<ScheduleCsvRow> for ScheduleEntry {
    type Error = ScheduleError;

    fn try_from(row: ScheduleCsvRow) -> Result<Self, Self::Error> {
        let date = parse_gtfs_date(&row.date)
            .map_err(|e| ScheduleError::Serialization(format!("trip '{}': {e}", row.trip_id)))?;
        Ok(ScheduleEntry {
            trip_id: row.trip_id,
            stop_id: row.stop_id,
            arrival: row.arrival,
            departure: row.departure,
            headsign: row.headsign,
            direction: row.direction,
            date,
            train_number: row.train_number.filter(|s| !s.is_empty()),
            direction_label: row.direction_label.filter(|s| !s.is_empty()),
        })
    }
}
