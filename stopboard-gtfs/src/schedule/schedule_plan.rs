use std::{collections::BTreeSet, path::PathBuf};

use chrono_tz::Tz;

use crate::schedule::{
    output::OutputFormat,
    projection::{ProjectionPolicy, RouteSelection, StopCanonicalization},
    verify::ReferenceFormat,
    RoutesConfig, ScheduleError, ScheduleTargetConfig, TrainNumberPolicy,
};

const ROUTE_WILDCARD: &str = "*";

/// a validated [`ScheduleTargetConfig`], ready to run.
#[derive(Clone, Debug)]
pub struct SchedulePlan {
    pub name: String,
    pub gtfs_directory: PathBuf,
    pub output_file: PathBuf,
    pub output_format: OutputFormat,
    pub projection: ProjectionPolicy,
    pub window_days: u32,
    pub timezone: Tz,
    pub train_numbers: Option<TrainNumberPolicy>,
    pub reference: ReferenceFormat,
}

impl TryFrom<&ScheduleTargetConfig> for SchedulePlan {
    type Error = ScheduleError;

    fn try_from(value: &ScheduleTargetConfig) -> Result<Self, Self::Error> {
        let with_name = |e: ScheduleError| match e {
            ScheduleError::Configuration(msg) => {
                ScheduleError::Configuration(format!("schedule '{}': {msg}", value.name))
            }
            other => other,
        };
        let routes = match &value.routes {
            RoutesConfig::Wildcard(w) if w.trim() == ROUTE_WILDCARD => RouteSelection::Any,
            RoutesConfig::Wildcard(other) => {
                return Err(with_name(ScheduleError::Configuration(format!(
                    "routes must be \"{ROUTE_WILDCARD}\" or a list of route ids, found '{other}'"
                ))))
            }
            RoutesConfig::List(ids) => RouteSelection::Only(trimmed_set(ids)),
        };
        let stop_ids = trimmed_set(&value.stop_ids);
        let canonicalization = match &value.primary_stop_id {
            Some(primary) => {
                StopCanonicalization::primary_stop(primary.trim(), &value.secondary_headsign_keywords)
            }
            None => StopCanonicalization::AllStops,
        };
        let projection =
            ProjectionPolicy::new(routes, stop_ids, canonicalization).map_err(with_name)?;
        if value.window_days == 0 {
            return Err(with_name(ScheduleError::Configuration(String::from(
                "window_days must be at least 1",
            ))));
        }
        let timezone: Tz = value
            .timezone
            .parse()
            .map_err(|_| ScheduleError::Timezone(value.timezone.clone()))?;
        let train_numbers = value
            .train_number
            .as_ref()
            .map(|t| TrainNumberPolicy::new(&t.trip_id_marker, &t.odd_label, &t.even_label))
            .transpose()
            .map_err(with_name)?;
        Ok(SchedulePlan {
            name: value.name.clone(),
            gtfs_directory: value.gtfs_directory.clone(),
            output_file: value.output_file.clone(),
            output_format: value.output_format,
            projection,
            window_days: value.window_days,
            timezone,
            train_numbers,
            reference: value.reference.clone(),
        })
    }
}

fn trimmed_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(routes: RoutesConfig) -> ScheduleTargetConfig {
        ScheduleTargetConfig {
            name: String::from("bus"),
            gtfs_directory: PathBuf::from("data/gtfs"),
            output_file: PathBuf::from("out/bus.json"),
            output_format: OutputFormat::Json,
            routes,
            stop_ids: vec![String::from("A"), String::from(" B ")],
            primary_stop_id: Some(String::from("A")),
            secondary_headsign_keywords: vec![String::from("Aubière")],
            window_days: 8,
            timezone: String::from("Europe/Paris"),
            train_number: None,
            reference: ReferenceFormat::default(),
        }
    }

    #[test]
    fn test_plan_from_config() {
        let plan = SchedulePlan::try_from(&target(RoutesConfig::List(vec![String::from("11")])))
            .unwrap();
        assert_eq!(plan.timezone, chrono_tz::Europe::Paris);
        assert!(plan.projection.tracks_stop("B"));
        assert!(plan.projection.routes.matches("11"));
        assert!(!plan.projection.routes.matches("12"));
    }

    #[test]
    fn test_wildcard_routes() {
        let plan = SchedulePlan::try_from(&target(RoutesConfig::Wildcard(String::from("*"))))
            .unwrap();
        assert_eq!(plan.projection.routes, RouteSelection::Any);
        let bad = SchedulePlan::try_from(&target(RoutesConfig::Wildcard(String::from("11"))));
        assert!(matches!(bad, Err(ScheduleError::Configuration(_))));
    }

    #[test]
    fn test_invalid_settings() {
        let mut unknown_tz = target(RoutesConfig::Wildcard(String::from("*")));
        unknown_tz.timezone = String::from("Europe/Clermont");
        assert!(matches!(
            SchedulePlan::try_from(&unknown_tz),
            Err(ScheduleError::Timezone(_))
        ));

        let mut no_days = target(RoutesConfig::Wildcard(String::from("*")));
        no_days.window_days = 0;
        assert!(matches!(
            SchedulePlan::try_from(&no_days),
            Err(ScheduleError::Configuration(_))
        ));

        let mut untracked_primary = target(RoutesConfig::Wildcard(String::from("*")));
        untracked_primary.primary_stop_id = Some(String::from("C"));
        match SchedulePlan::try_from(&untracked_primary) {
            Err(ScheduleError::Configuration(msg)) => assert!(msg.starts_with("schedule 'bus'")),
            other => panic!("expected configuration error, found {other:?}"),
        }
    }
}
