use serde::{Deserialize, Serialize};

/// a row of trips.txt reduced to the fields needed for schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    /// GTFS trip identifier
    pub trip_id: String,
    /// GTFS route_id associated with this trip
    pub route_id: String,
    /// service associated with this trip, a key into calendar.txt/calendar_dates.txt
    pub service_id: String,
    /// rider-facing destination text
    pub headsign: String,
    /// binary branch indicator (0 or 1), not a compass direction
    pub direction: u8,
}

impl TripRecord {
    pub fn new(
        trip_id: &str,
        route_id: &str,
        service_id: &str,
        headsign: &str,
        direction: u8,
    ) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            route_id: route_id.to_string(),
            service_id: service_id.to_string(),
            headsign: headsign.to_string(),
            direction,
        }
    }
}

/// a row of stop_times.txt. times are seconds since the start of the service day
/// and may exceed 86400 for trips running past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: u32,
    pub departure_time: u32,
}

impl StopTimeRecord {
    pub fn new(
        trip_id: &str,
        stop_id: &str,
        stop_sequence: u32,
        arrival_time: u32,
        departure_time: u32,
    ) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            stop_id: stop_id.to_string(),
            stop_sequence,
            arrival_time,
            departure_time,
        }
    }
}
