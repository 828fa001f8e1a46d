use std::path::Path;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use stopboard_core::util::date_deserialization_ops::parse_app_date;

use crate::{
    app::{find_target, read_targets},
    schedule::{batch_processing_error, pipeline, SchedulePlan, ScheduleError},
};

/// Command line tool for publishing static departure-board schedules from GTFS feeds
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct StopboardApp {
    #[command(subcommand)]
    pub op: StopboardOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum StopboardOperation {
    /// generate and publish every configured schedule
    Generate {
        /// TOML file with one [[schedules]] entry per published schedule
        #[arg(short, long)]
        configuration_file: String,
        /// first service date of the window as YYYY-MM-DD. defaults to today in
        /// the timezone of each schedule.
        #[arg(short, long, value_parser = parse_reference_date)]
        reference_date: Option<NaiveDate>,
        /// only generate the schedule with this name
        #[arg(long)]
        only: Option<String>,
    },
    /// compare a published schedule with an operator's printed timetable
    Verify {
        #[arg(short, long)]
        configuration_file: String,
        /// name of the schedule to verify
        #[arg(short, long)]
        schedule: String,
        /// text export of the printed timetable
        #[arg(long)]
        reference_file: String,
        /// number of dates to check, starting at the reference date
        #[arg(long, default_value_t = 3)]
        days: u32,
        #[arg(short, long, value_parser = parse_reference_date)]
        reference_date: Option<NaiveDate>,
    },
    /// export every stop of the trips of a schedule, for trip details without live data
    StopTimes {
        #[arg(short, long)]
        configuration_file: String,
        /// name of the schedule whose routes and stops select the trips
        #[arg(short, long)]
        schedule: String,
        /// JSON file to write
        #[arg(short, long)]
        output_file: String,
    },
}

impl StopboardOperation {
    pub fn run(&self) -> Result<(), ScheduleError> {
        match self {
            StopboardOperation::Generate {
                configuration_file,
                reference_date,
                only,
            } => run_generate(Path::new(configuration_file), *reference_date, only.as_deref()),
            StopboardOperation::Verify {
                configuration_file,
                schedule,
                reference_file,
                days,
                reference_date,
            } => {
                let targets = read_targets(Path::new(configuration_file))?;
                let plan = SchedulePlan::try_from(find_target(&targets, schedule)?)?;
                let report =
                    pipeline::verify(&plan, Path::new(reference_file), *days, *reference_date)?;
                let missing = report.discrepancies().count();
                if missing == 0 {
                    log::info!("{schedule}: published schedule matches the reference timetable");
                } else {
                    log::warn!("{schedule}: {missing} reference departures not found");
                }
                Ok(())
            }
            StopboardOperation::StopTimes {
                configuration_file,
                schedule,
                output_file,
            } => {
                let targets = read_targets(Path::new(configuration_file))?;
                let plan = SchedulePlan::try_from(find_target(&targets, schedule)?)?;
                pipeline::export_stop_times(&plan, Path::new(output_file))?;
                Ok(())
            }
        }
    }
}

/// runs every selected schedule even when an earlier one fails. each failure
/// leaves that schedule's previous output in place.
fn run_generate(
    configuration_file: &Path,
    reference_date: Option<NaiveDate>,
    only: Option<&str>,
) -> Result<(), ScheduleError> {
    let targets = read_targets(configuration_file)?;
    let selected = match only {
        Some(name) => vec![find_target(&targets, name)?],
        None => targets.iter().collect(),
    };
    let errors: Vec<ScheduleError> = selected
        .into_iter()
        .filter_map(|target| {
            let result = SchedulePlan::try_from(target)
                .and_then(|plan| pipeline::generate(&plan, reference_date));
            match result {
                Ok(run) => {
                    log::info!(
                        "{}: published {} entries for {}",
                        target.name,
                        run.entries.len(),
                        run.window
                    );
                    None
                }
                Err(e) => {
                    log::error!("{}: {e}", target.name);
                    Some(e)
                }
            }
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(batch_processing_error(&errors))
    }
}

fn parse_reference_date(value: &str) -> Result<NaiveDate, String> {
    parse_app_date(value).map_err(|e| e.to_string())
}
