use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stopboard_core::util::date_deserialization_ops::{deserialize_gtfs_date, serialize_gtfs_date};

use crate::schedule::feed::{StopTimeRecord, TripRecord};

/// one materialized visit of a trip at a tracked stop on a service date. this is
/// the record read by departure-board clients, so field names are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub trip_id: String,
    pub stop_id: String,
    /// unix timestamp in seconds
    pub arrival: i64,
    /// unix timestamp in seconds
    pub departure: i64,
    pub headsign: String,
    pub direction: u8,
    /// service date, which precedes the calendar date of the arrival for
    /// trips running past midnight
    #[serde(
        serialize_with = "serialize_gtfs_date",
        deserialize_with = "deserialize_gtfs_date"
    )]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_label: Option<String>,
}

impl ScheduleEntry {
    pub fn new(
        trip: &TripRecord,
        stop_time: &StopTimeRecord,
        date: NaiveDate,
        arrival: i64,
        departure: i64,
    ) -> Self {
        Self {
            trip_id: trip.trip_id.clone(),
            stop_id: stop_time.stop_id.clone(),
            arrival,
            departure,
            headsign: trip.headsign.clone(),
            direction: trip.direction,
            date,
            train_number: None,
            direction_label: None,
        }
    }

    /// ordering key of published schedules: arrival, then trip, stop and date.
    pub fn sort_key(&self) -> (i64, &str, &str, NaiveDate) {
        (self.arrival, &self.trip_id, &self.stop_id, self.date)
    }
}
