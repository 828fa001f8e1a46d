use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::schedule::{
    feed::GtfsFeed,
    output::fs_ops,
    projection::{ProjectionPolicy, RouteSelection},
    ScheduleError,
};

/// a stop of a trip, with times in seconds since the service day origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimeDetail {
    pub stop_id: String,
    pub sequence: u32,
    pub arrival_time: u32,
    pub departure_time: u32,
}

/// every stop of one trip, ordered by sequence. clients show these when no
/// live trip details are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripStopTimes {
    pub trip_id: String,
    pub headsign: String,
    pub direction: u8,
    pub stops: Vec<StopTimeDetail>,
}

/// collects the full stop lists of the trips on the selected routes. under the
/// route wildcard, the trips touching one of the tracked stops are used. trips
/// are ordered by trip_id.
pub fn collect_trip_stop_times(feed: &GtfsFeed, policy: &ProjectionPolicy) -> Vec<TripStopTimes> {
    let trip_ids: BTreeSet<&str> = match &policy.routes {
        RouteSelection::Only(_) => feed
            .trips
            .values()
            .filter(|t| policy.routes.matches(&t.route_id))
            .map(|t| t.trip_id.as_str())
            .collect(),
        RouteSelection::Any => feed
            .stop_times
            .iter()
            .filter(|st| policy.tracks_stop(&st.stop_id))
            .map(|st| st.trip_id.as_str())
            .collect(),
    };

    let mut by_trip: BTreeMap<&str, TripStopTimes> = BTreeMap::new();
    for trip_id in trip_ids.into_iter() {
        if let Some(trip) = feed.get_trip(trip_id) {
            by_trip.insert(
                trip_id,
                TripStopTimes {
                    trip_id: trip.trip_id.clone(),
                    headsign: trip.headsign.clone(),
                    direction: trip.direction,
                    stops: vec![],
                },
            );
        }
    }
    for st in feed.stop_times.iter() {
        if let Some(trip) = by_trip.get_mut(st.trip_id.as_str()) {
            trip.stops.push(StopTimeDetail {
                stop_id: st.stop_id.clone(),
                sequence: st.stop_sequence,
                arrival_time: st.arrival_time,
                departure_time: st.departure_time,
            });
        }
    }
    by_trip
        .into_values()
        .map(|mut trip| {
            trip.stops.sort_by_key(|s| s.sequence);
            trip
        })
        .collect()
}

/// writes the trip stop lists as a JSON array, replacing any previous file.
pub fn export_trip_stop_times(
    feed: &GtfsFeed,
    policy: &ProjectionPolicy,
    output_file: &Path,
) -> Result<usize, ScheduleError> {
    let trips = collect_trip_stop_times(feed, policy);
    if trips.is_empty() {
        return Err(ScheduleError::Configuration(String::from(
            "no trips match the configured routes and stops",
        )));
    }
    let bytes =
        serde_json::to_vec(&trips).map_err(|e| ScheduleError::Serialization(e.to_string()))?;
    fs_ops::write_atomically(output_file, &bytes)?;
    log::info!(
        "exported stop times of {} trips to {}",
        trips.len(),
        output_file.display()
    );
    Ok(trips.len())
}
