use std::collections::BTreeMap;

use stopboard_core::util::gtfs_time_ops;

use super::{ProjectionPolicy, StopCanonicalization};
use crate::schedule::{
    feed::{GtfsFeed, StopTimeRecord, TripRecord},
    GapReport, LookupGap,
};

/// a trip paired with one of its stop-times at a tracked stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedStopTime {
    pub trip: TripRecord,
    pub stop_time: StopTimeRecord,
}

/// result of projecting a feed onto the tracked routes and stops, ordered by
/// trip_id and then stop sequence.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub stop_times: Vec<ProjectedStopTime>,
    pub gaps: GapReport,
    /// trips touching only secondary stops whose headsign failed the allow-list
    pub dropped_by_headsign: usize,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}

/// collects every (trip, stop-time) pair at the tracked stops for the selected
/// routes, then reduces each trip according to the canonicalization policy.
pub fn project_stop_times(feed: &GtfsFeed, policy: &ProjectionPolicy) -> Projection {
    let mut gaps = GapReport::default();
    let mut by_trip: BTreeMap<&str, (&TripRecord, Vec<&StopTimeRecord>)> = BTreeMap::new();
    for stop_time in feed.stop_times.iter() {
        if !policy.tracks_stop(&stop_time.stop_id) {
            continue;
        }
        let trip = match feed.get_trip(&stop_time.trip_id) {
            Some(trip) => trip,
            None => {
                gaps.record(LookupGap::UnknownTrip {
                    trip_id: stop_time.trip_id.clone(),
                    stop_id: stop_time.stop_id.clone(),
                });
                continue;
            }
        };
        if !policy.routes.matches(&trip.route_id) {
            continue;
        }
        by_trip
            .entry(trip.trip_id.as_str())
            .or_insert_with(|| (trip, vec![]))
            .1
            .push(stop_time);
    }

    let mut dropped_by_headsign = 0;
    let mut stop_times = vec![];
    for (_, (trip, mut trip_stop_times)) in by_trip.into_iter() {
        trip_stop_times.sort_by(|a, b| {
            a.stop_sequence
                .cmp(&b.stop_sequence)
                .then_with(|| a.stop_id.cmp(&b.stop_id))
        });
        match &policy.canonicalization {
            StopCanonicalization::AllStops => {
                stop_times.extend(trip_stop_times.into_iter().map(|st| project(trip, st)));
            }
            StopCanonicalization::PrimaryStop {
                primary_stop_id, ..
            } => {
                let primary = trip_stop_times
                    .iter()
                    .find(|st| &st.stop_id == primary_stop_id);
                match primary {
                    Some(st) => stop_times.push(project(trip, st)),
                    None if policy.canonicalization.allows_headsign(&trip.headsign) => {
                        // sorted by sequence, so the first is the earliest secondary stop
                        if let Some(st) = trip_stop_times.first() {
                            stop_times.push(project(trip, st));
                        }
                    }
                    None => {
                        let at = trip_stop_times
                            .first()
                            .map(|st| gtfs_time_ops::format_gtfs_time(st.departure_time))
                            .unwrap_or_default();
                        log::debug!(
                            "dropping trip '{}' at secondary stop ({at}), headsign '{}' not allowed",
                            trip.trip_id,
                            trip.headsign
                        );
                        dropped_by_headsign += 1;
                    }
                }
            }
        }
    }

    log::info!(
        "projected {} stop times ({} trips dropped by headsign)",
        stop_times.len(),
        dropped_by_headsign
    );
    Projection {
        stop_times,
        gaps,
        dropped_by_headsign,
    }
}

fn project(trip: &TripRecord, stop_time: &StopTimeRecord) -> ProjectedStopTime {
    ProjectedStopTime {
        trip: trip.clone(),
        stop_time: stop_time.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::schedule::{
        projection::{ProjectionPolicy, RouteSelection},
        LookupGapKind,
    };

    const PRIMARY: &str = "JAUDE";
    const SECONDARY: &str = "PATURAL";

    fn feed() -> GtfsFeed {
        let trips = vec![
            TripRecord::new("T1", "R11", "WK", "GERZAT Champfleuri", 0),
            TripRecord::new("T2", "R11", "WK", "AUBIERE Pl. des Ramacles", 1),
            TripRecord::new("T3", "R11", "WK", "GERZAT Champfleuri", 0),
            TripRecord::new("T4", "R12", "WK", "ROMAGNAT Tremonteix", 1),
        ];
        let stop_times = vec![
            // T1 visits the secondary stop first, then the primary stop
            StopTimeRecord::new("T1", SECONDARY, 3, 100, 110),
            StopTimeRecord::new("T1", PRIMARY, 7, 500, 510),
            StopTimeRecord::new("T1", "OTHER", 8, 600, 600),
            StopTimeRecord::new("T2", SECONDARY, 4, 200, 200),
            StopTimeRecord::new("T3", SECONDARY, 2, 300, 300),
            StopTimeRecord::new("T4", PRIMARY, 5, 400, 400),
            StopTimeRecord::new("GHOST", PRIMARY, 1, 0, 0),
        ];
        GtfsFeed::new(vec![], vec![], trips, stop_times)
    }

    fn policy(routes: RouteSelection, canonicalization: StopCanonicalization) -> ProjectionPolicy {
        let stops: BTreeSet<String> = [PRIMARY, SECONDARY].iter().map(|s| s.to_string()).collect();
        ProjectionPolicy::new(routes, stops, canonicalization).unwrap()
    }

    fn primary_policy(routes: RouteSelection) -> ProjectionPolicy {
        policy(
            routes,
            StopCanonicalization::primary_stop(
                PRIMARY,
                &[String::from("aubière"), String::from("aubiere")],
            ),
        )
    }

    fn summary(projection: &Projection) -> Vec<(&str, &str)> {
        projection
            .stop_times
            .iter()
            .map(|p| (p.trip.trip_id.as_str(), p.stop_time.stop_id.as_str()))
            .collect()
    }

    #[test]
    fn test_primary_stop_wins_over_earlier_secondary() {
        let routes = RouteSelection::Only(BTreeSet::from([String::from("R11")]));
        let projection = project_stop_times(&feed(), &primary_policy(routes));
        assert_eq!(summary(&projection), vec![("T1", PRIMARY), ("T2", SECONDARY)]);
        assert_eq!(projection.dropped_by_headsign, 1);
    }

    #[test]
    fn test_secondary_only_trip_requires_allowed_headsign() {
        let routes = RouteSelection::Only(BTreeSet::from([String::from("R11")]));
        let projection = project_stop_times(&feed(), &primary_policy(routes));
        assert!(projection.stop_times.iter().all(|p| p.trip.trip_id != "T3"));
        let t2 = &projection.stop_times[1];
        assert_eq!(t2.trip.trip_id, "T2");
        assert_eq!(t2.stop_time.stop_sequence, 4);
    }

    #[test]
    fn test_route_wildcard_matches_every_route() {
        let projection = project_stop_times(&feed(), &primary_policy(RouteSelection::Any));
        assert_eq!(
            summary(&projection),
            vec![("T1", PRIMARY), ("T2", SECONDARY), ("T4", PRIMARY)]
        );
    }

    #[test]
    fn test_all_stops_keeps_every_tracked_stop_time() {
        let projection = project_stop_times(
            &feed(),
            &policy(RouteSelection::Any, StopCanonicalization::AllStops),
        );
        assert_eq!(
            summary(&projection),
            vec![
                ("T1", SECONDARY),
                ("T1", PRIMARY),
                ("T2", SECONDARY),
                ("T3", SECONDARY),
                ("T4", PRIMARY)
            ]
        );
        assert_eq!(projection.dropped_by_headsign, 0);
    }

    #[test]
    fn test_unknown_trip_is_a_lookup_gap() {
        let projection = project_stop_times(&feed(), &primary_policy(RouteSelection::Any));
        assert_eq!(projection.gaps.count(LookupGapKind::UnknownTrip), 1);
        assert!(projection.stop_times.iter().all(|p| p.trip.trip_id != "GHOST"));
    }

    #[test]
    fn test_unmatched_routes_project_nothing() {
        let routes = RouteSelection::Only(BTreeSet::from([String::from("R99")]));
        let projection = project_stop_times(&feed(), &primary_policy(routes));
        assert!(projection.is_empty());
    }
}
