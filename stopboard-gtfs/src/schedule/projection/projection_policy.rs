use std::collections::BTreeSet;

use itertools::Itertools;

use crate::schedule::ScheduleError;

/// which routes contribute trips to a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSelection {
    /// every trip touching one of the tracked stops
    Any,
    /// only trips on these route ids
    Only(BTreeSet<String>),
}

impl RouteSelection {
    pub fn matches(&self, route_id: &str) -> bool {
        match self {
            RouteSelection::Any => true,
            RouteSelection::Only(routes) => routes.contains(route_id),
        }
    }
}

/// how the stop-times of one trip at the tracked stops are reduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopCanonicalization {
    /// keep one entry per tracked stop-time
    AllStops,
    /// keep one entry per trip. a stop-time at the primary stop always wins.
    /// trips that only touch the other tracked stops are kept when their
    /// headsign contains one of the keywords, ignoring case.
    PrimaryStop {
        primary_stop_id: String,
        secondary_headsign_keywords: Vec<String>,
    },
}

impl StopCanonicalization {
    pub fn primary_stop(primary_stop_id: &str, keywords: &[String]) -> Self {
        StopCanonicalization::PrimaryStop {
            primary_stop_id: primary_stop_id.to_string(),
            secondary_headsign_keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// tests the headsign against the allow-list. always false for AllStops.
    pub fn allows_headsign(&self, headsign: &str) -> bool {
        match self {
            StopCanonicalization::AllStops => false,
            StopCanonicalization::PrimaryStop {
                secondary_headsign_keywords,
                ..
            } => {
                let headsign = headsign.to_lowercase();
                secondary_headsign_keywords
                    .iter()
                    .any(|keyword| headsign.contains(keyword.as_str()))
            }
        }
    }
}

/// the route and stop selection for one schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionPolicy {
    pub routes: RouteSelection,
    pub stop_ids: BTreeSet<String>,
    pub canonicalization: StopCanonicalization,
}

impl ProjectionPolicy {
    pub fn new(
        routes: RouteSelection,
        stop_ids: BTreeSet<String>,
        canonicalization: StopCanonicalization,
    ) -> Result<ProjectionPolicy, ScheduleError> {
        if let RouteSelection::Only(route_ids) = &routes {
            if route_ids.is_empty() {
                return Err(ScheduleError::Configuration(String::from(
                    "route list is empty, use \"*\" to match every route",
                )));
            }
        }
        if stop_ids.is_empty() {
            return Err(ScheduleError::Configuration(String::from(
                "stop list is empty",
            )));
        }
        if let StopCanonicalization::PrimaryStop {
            primary_stop_id, ..
        } = &canonicalization
        {
            if !stop_ids.contains(primary_stop_id) {
                let msg = format!(
                    "primary stop '{primary_stop_id}' is not one of the tracked stops [{}]",
                    stop_ids.iter().join(", ")
                );
                return Err(ScheduleError::Configuration(msg));
            }
        }
        Ok(ProjectionPolicy {
            routes,
            stop_ids,
            canonicalization,
        })
    }

    pub fn tracks_stop(&self, stop_id: &str) -> bool {
        self.stop_ids.contains(stop_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primary_stop_must_be_tracked() {
        let result = ProjectionPolicy::new(
            RouteSelection::Any,
            stops(&["A", "B"]),
            StopCanonicalization::primary_stop("C", &[]),
        );
        assert!(matches!(result, Err(ScheduleError::Configuration(_))));
    }

    #[test]
    fn test_empty_selections_are_rejected() {
        let empty_routes = ProjectionPolicy::new(
            RouteSelection::Only(BTreeSet::new()),
            stops(&["A"]),
            StopCanonicalization::AllStops,
        );
        assert!(matches!(empty_routes, Err(ScheduleError::Configuration(_))));
        let empty_stops = ProjectionPolicy::new(
            RouteSelection::Any,
            BTreeSet::new(),
            StopCanonicalization::AllStops,
        );
        assert!(matches!(empty_stops, Err(ScheduleError::Configuration(_))));
    }

    #[test]
    fn test_headsign_allow_list_ignores_case() {
        let keywords = vec![String::from("Aubière"), String::from(" romagnat ")];
        let policy = StopCanonicalization::primary_stop("A", &keywords);
        assert!(policy.allows_headsign("AUBIÈRE Pl. des Ramacles"));
        assert!(policy.allows_headsign("Romagnat Tremonteix"));
        assert!(!policy.allows_headsign("GERZAT Champfleuri"));
        assert!(!StopCanonicalization::AllStops.allows_headsign("AUBIÈRE"));
    }
}
