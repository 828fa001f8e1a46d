use std::path::Path;

use config::{Config, File};
use itertools::Itertools;

use crate::schedule::{ScheduleError, ScheduleTargetConfig};

const SCHEDULES_KEY: &str = "schedules";

/// reads the `[[schedules]]` entries of a TOML configuration file.
pub fn read_targets(configuration_file: &Path) -> Result<Vec<ScheduleTargetConfig>, ScheduleError> {
    let filename = configuration_file.display();
    let config = Config::builder()
        .add_source(File::from(configuration_file))
        .build()
        .map_err(|e| {
            let msg = format!("file '{filename}' produced error: {e}");
            ScheduleError::Configuration(msg)
        })?;
    let targets = config
        .get::<Vec<ScheduleTargetConfig>>(SCHEDULES_KEY)
        .map_err(|e| {
            let msg = format!("error reading '{SCHEDULES_KEY}' key in '{filename}': {e}");
            ScheduleError::Configuration(msg)
        })?;
    if targets.is_empty() {
        let msg = format!("file '{filename}' defines no schedules");
        return Err(ScheduleError::Configuration(msg));
    }
    if let Some(name) = targets.iter().map(|t| &t.name).duplicates().next() {
        let msg = format!("file '{filename}' defines schedule '{name}' more than once");
        return Err(ScheduleError::Configuration(msg));
    }
    Ok(targets)
}

/// looks up a schedule by name.
pub fn find_target<'a>(
    targets: &'a [ScheduleTargetConfig],
    name: &str,
) -> Result<&'a ScheduleTargetConfig, ScheduleError> {
    targets.iter().find(|t| t.name == name).ok_or_else(|| {
        let known = targets.iter().map(|t| t.name.as_str()).join(", ");
        ScheduleError::Configuration(format!("no schedule named '{name}', expected one of [{known}]"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{output::OutputFormat, RoutesConfig};

    const CONFIG: &str = r#"
[[schedules]]
name = "bus"
gtfs_directory = "data/t2c"
output_file = "public/static_schedule.json"
routes = ["11821953316814877"]
stop_ids = ["3377704015495667", "3377704015495668"]
primary_stop_id = "3377704015495667"
secondary_headsign_keywords = ["AUBIÈRE", "ROMAGNAT"]

[schedules.reference]
weekday_markers = ["DU LUNDI AU VENDREDI"]

[[schedules.reference.direction_markers]]
marker = "DE GERZAT"
direction = 0

[[schedules]]
name = "rail"
gtfs_directory = "data/sncf"
output_file = "public/static_train_schedule.csv"
output_format = "csv"
routes = "*"
stop_ids = ["StopPoint:OCETrain TER-87734046"]
window_days = 4

[schedules.train_number]
trip_id_marker = "OCESN"
odd_label = "To Clermont"
even_label = "From Clermont"
"#;

    #[test]
    fn test_read_targets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopboard.toml");
        std::fs::write(&path, CONFIG).unwrap();
        let targets = read_targets(&path).unwrap();
        assert_eq!(targets.len(), 2);

        let bus = find_target(&targets, "bus").unwrap();
        assert_eq!(
            bus.routes,
            RoutesConfig::List(vec![String::from("11821953316814877")])
        );
        assert_eq!(bus.window_days, 8);
        assert_eq!(bus.timezone, "Europe/Paris");
        assert_eq!(bus.output_format, OutputFormat::Json);
        assert_eq!(bus.reference.direction_markers.len(), 1);
        // unset reference fields keep their defaults
        assert_eq!(bus.reference.saturday_markers, vec![String::from("LE SAMEDI")]);

        let rail = find_target(&targets, "rail").unwrap();
        assert_eq!(rail.routes, RoutesConfig::Wildcard(String::from("*")));
        assert_eq!(rail.output_format, OutputFormat::Csv);
        assert_eq!(rail.window_days, 4);
        assert_eq!(
            rail.train_number.as_ref().map(|t| t.trip_id_marker.as_str()),
            Some("OCESN")
        );
        assert!(rail.primary_stop_id.is_none());

        assert!(matches!(
            find_target(&targets, "tram"),
            Err(ScheduleError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_schedules_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "title = \"nothing\"\n").unwrap();
        assert!(matches!(
            read_targets(&path),
            Err(ScheduleError::Configuration(_))
        ));
    }

    #[test]
    fn test_sample_configuration() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("configuration")
            .join("stopboard.toml");
        let targets = read_targets(&path).unwrap();
        let bus = find_target(&targets, "t2c-line-e1").unwrap();
        assert_eq!(bus.primary_stop_id.as_deref(), Some("3377704015495667"));
        assert!(bus.stop_ids.contains(&String::from("3377704015495668")));
        let rail = find_target(&targets, "sncf-gerzat").unwrap();
        assert_eq!(rail.routes, RoutesConfig::Wildcard(String::from("*")));
        let plan = crate::schedule::SchedulePlan::try_from(rail).unwrap();
        let train_numbers = plan.train_numbers.unwrap();
        let train = train_numbers.extract("OCESN874111F").unwrap();
        assert_eq!(train.direction_label, "To Clermont");
    }
}
