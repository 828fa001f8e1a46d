use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::schedule::{output::OutputFormat, verify::ReferenceFormat};

/// route selection as written in a configuration file: the wildcard `"*"` or a
/// list of route ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoutesConfig {
    Wildcard(String),
    List(Vec<String>),
}

/// configures a [`crate::schedule::TrainNumberPolicy`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainNumberConfig {
    /// text in the trip id that immediately precedes the train number
    pub trip_id_marker: String,
    /// direction label of odd train numbers
    pub odd_label: String,
    /// direction label of even train numbers
    pub even_label: String,
}

/// one `[[schedules]]` entry of a configuration file, describing one published
/// schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleTargetConfig {
    /// name used on the command line and in logs
    pub name: String,
    /// directory holding the unzipped GTFS text tables
    pub gtfs_directory: PathBuf,
    /// path of the published schedule, replaced on every run
    pub output_file: PathBuf,
    #[serde(default)]
    pub output_format: OutputFormat,
    pub routes: RoutesConfig,
    pub stop_ids: Vec<String>,
    /// when set, each trip contributes a single entry, preferring this stop
    #[serde(default)]
    pub primary_stop_id: Option<String>,
    /// trips that only touch the other tracked stops are kept when their
    /// headsign contains one of these, ignoring case
    #[serde(default)]
    pub secondary_headsign_keywords: Vec<String>,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// IANA timezone identifier of the feed
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub train_number: Option<TrainNumberConfig>,
    /// how to read reference timetables when verifying this schedule
    #[serde(default)]
    pub reference: ReferenceFormat,
}

pub fn default_window_days() -> u32 {
    8
}

pub fn default_timezone() -> String {
    String::from("Europe/Paris")
}
