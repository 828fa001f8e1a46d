use std::collections::HashMap;

use gtfs_structures::{Calendar, CalendarDate};

use super::{StopTimeRecord, TripRecord};
use crate::schedule::GapReport;

/// the four GTFS relations used for schedule generation, held in memory for the
/// duration of one run.
#[derive(Debug, Default)]
pub struct GtfsFeed {
    /// calendar.txt entries
    pub calendar: Vec<Calendar>,
    /// calendar_dates.txt entries, empty if the file is absent
    pub calendar_dates: Vec<CalendarDate>,
    /// trips.txt entries by trip_id
    pub trips: HashMap<String, TripRecord>,
    /// stop_times.txt entries in file order
    pub stop_times: Vec<StopTimeRecord>,
    /// rows skipped while reading the feed
    pub gaps: GapReport,
}

impl GtfsFeed {
    /// builds a feed from in-memory tables. when a trip_id appears more than once,
    /// the last row wins.
    pub fn new(
        calendar: Vec<Calendar>,
        calendar_dates: Vec<CalendarDate>,
        trips: Vec<TripRecord>,
        stop_times: Vec<StopTimeRecord>,
    ) -> Self {
        let trips = trips
            .into_iter()
            .map(|trip| (trip.trip_id.clone(), trip))
            .collect();
        Self {
            calendar,
            calendar_dates,
            trips,
            stop_times,
            gaps: GapReport::default(),
        }
    }

    pub fn get_trip(&self, trip_id: &str) -> Option<&TripRecord> {
        self.trips.get(trip_id)
    }
}
