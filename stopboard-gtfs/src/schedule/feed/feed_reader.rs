use std::path::Path;

use gtfs_structures::{Calendar, CalendarDate, Exception};
use kdam::tqdm;
use serde::Deserialize;
use stopboard_core::util::{date_deserialization_ops, flag_ops, gtfs_time_ops};

use super::{gtfs_table::GtfsTable, GtfsFeed, StopTimeRecord, TripRecord};
use crate::schedule::{GapReport, LookupGap, ScheduleError};

const CALENDAR_FILE: &str = "calendar.txt";
const CALENDAR_DATES_FILE: &str = "calendar_dates.txt";
const TRIPS_FILE: &str = "trips.txt";
const STOP_TIMES_FILE: &str = "stop_times.txt";

const CALENDAR_COLUMNS: [&str; 3] = ["service_id", "start_date", "end_date"];
const WEEKDAY_COLUMNS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];
const CALENDAR_DATES_COLUMNS: [&str; 3] = ["service_id", "date", "exception_type"];
const TRIPS_COLUMNS: [&str; 3] = ["trip_id", "route_id", "service_id"];
const STOP_TIMES_COLUMNS: [&str; 5] = [
    "trip_id",
    "stop_id",
    "stop_sequence",
    "arrival_time",
    "departure_time",
];

#[derive(Deserialize)]
struct RawCalendarRow {
    service_id: String,
    start_date: String,
    end_date: String,
    #[serde(default)]
    monday: Option<String>,
    #[serde(default)]
    tuesday: Option<String>,
    #[serde(default)]
    wednesday: Option<String>,
    #[serde(default)]
    thursday: Option<String>,
    #[serde(default)]
    friday: Option<String>,
    #[serde(default)]
    saturday: Option<String>,
    #[serde(default)]
    sunday: Option<String>,
}

#[derive(Deserialize)]
struct RawCalendarDateRow {
    service_id: String,
    date: String,
    exception_type: String,
}

#[derive(Deserialize)]
struct RawTripRow {
    trip_id: String,
    route_id: String,
    service_id: String,
    #[serde(default)]
    trip_headsign: Option<String>,
    #[serde(default)]
    direction_id: Option<String>,
}

#[derive(Deserialize)]
struct RawStopTimeRow {
    trip_id: String,
    stop_id: String,
    stop_sequence: String,
    #[serde(default)]
    arrival_time: Option<String>,
    #[serde(default)]
    departure_time: Option<String>,
}

/// reads the calendar, calendar exceptions, trips and stop times of an unzipped
/// GTFS feed directory.
///
/// calendar_dates.txt may be absent, which is the same as an empty exception set.
/// the other three files are required. the four files are read concurrently.
pub fn read_feed(directory: &Path) -> Result<GtfsFeed, ScheduleError> {
    if !directory.is_dir() {
        return Err(ScheduleError::Read {
            path: directory.to_path_buf(),
            message: String::from("GTFS feed location is not a directory"),
        });
    }
    log::info!("reading GTFS feed at {}", directory.display());

    let ((calendar, calendar_dates), (trips, stop_times)) = rayon::join(
        || rayon::join(|| read_calendar(directory), || read_calendar_dates(directory)),
        || rayon::join(|| read_trips(directory), || read_stop_times(directory)),
    );
    let calendar = calendar?;
    let calendar_dates = calendar_dates?;
    let trips = trips?;
    let (stop_times, gaps) = stop_times?;

    log::info!(
        "read {} calendar entries, {} calendar exceptions, {} trips, {} stop times",
        calendar.len(),
        calendar_dates.len(),
        trips.len(),
        stop_times.len()
    );
    let mut feed = GtfsFeed::new(calendar, calendar_dates, trips, stop_times);
    feed.gaps = gaps;
    Ok(feed)
}

fn require_table(directory: &Path, file: &'static str) -> Result<GtfsTable, ScheduleError> {
    GtfsTable::open(directory, file)?
        .ok_or_else(|| ScheduleError::feed_format(file, "required file is missing from the feed"))
}

fn read_calendar(directory: &Path) -> Result<Vec<Calendar>, ScheduleError> {
    let table = require_table(directory, CALENDAR_FILE)?;
    table.require_columns(&CALENDAR_COLUMNS)?;
    for column in WEEKDAY_COLUMNS.iter().filter(|c| !table.has_column(c)) {
        log::warn!("{CALENDAR_FILE} has no '{column}' column, treating it as 0 for every service");
    }
    table
        .rows::<RawCalendarRow>()
        .map(|row| {
            let (line, raw) = row?;
            calendar_from_raw(line, raw)
        })
        .collect()
}

fn calendar_from_raw(line: u64, raw: RawCalendarRow) -> Result<Calendar, ScheduleError> {
    let start_date = gtfs_date(CALENDAR_FILE, line, &raw.start_date)?;
    let end_date = gtfs_date(CALENDAR_FILE, line, &raw.end_date)?;
    let service_id = raw.service_id;
    let flag = |column: &str, value: Option<&String>| -> bool {
        match value {
            None => false,
            Some(v) => flag_ops::parse_gtfs_flag(v).unwrap_or_else(|| {
                log::warn!(
                    "{CALENDAR_FILE} line {line}: service '{service_id}' has malformed {column} flag '{v}', treating it as 0"
                );
                false
            }),
        }
    };
    Ok(Calendar {
        monday: flag("monday", raw.monday.as_ref()),
        tuesday: flag("tuesday", raw.tuesday.as_ref()),
        wednesday: flag("wednesday", raw.wednesday.as_ref()),
        thursday: flag("thursday", raw.thursday.as_ref()),
        friday: flag("friday", raw.friday.as_ref()),
        saturday: flag("saturday", raw.saturday.as_ref()),
        sunday: flag("sunday", raw.sunday.as_ref()),
        start_date,
        end_date,
        id: service_id,
    })
}

fn read_calendar_dates(directory: &Path) -> Result<Vec<CalendarDate>, ScheduleError> {
    let table = match GtfsTable::open(directory, CALENDAR_DATES_FILE)? {
        Some(table) => table,
        None => {
            log::info!("{CALENDAR_DATES_FILE} not found, using an empty exception set");
            return Ok(vec![]);
        }
    };
    table.require_columns(&CALENDAR_DATES_COLUMNS)?;
    table
        .rows::<RawCalendarDateRow>()
        .map(|row| {
            let (line, raw) = row?;
            let exception_type = match raw.exception_type.as_str() {
                "1" => Exception::Added,
                "2" => Exception::Deleted,
                other => {
                    let msg = format!("line {line}: exception_type must be 1 or 2, found '{other}'");
                    return Err(ScheduleError::feed_format(CALENDAR_DATES_FILE, msg));
                }
            };
            Ok(CalendarDate {
                service_id: raw.service_id,
                date: gtfs_date(CALENDAR_DATES_FILE, line, &raw.date)?,
                exception_type,
            })
        })
        .collect()
}

fn read_trips(directory: &Path) -> Result<Vec<TripRecord>, ScheduleError> {
    let table = require_table(directory, TRIPS_FILE)?;
    table.require_columns(&TRIPS_COLUMNS)?;
    table
        .rows::<RawTripRow>()
        .map(|row| {
            let (line, raw) = row?;
            let direction = match raw.direction_id.as_deref() {
                None | Some("0") => 0,
                Some("1") => 1,
                Some(other) => {
                    log::warn!(
                        "{TRIPS_FILE} line {line}: trip '{}' has malformed direction_id '{other}', using 0",
                        raw.trip_id
                    );
                    0
                }
            };
            Ok(TripRecord {
                trip_id: raw.trip_id,
                route_id: raw.route_id,
                service_id: raw.service_id,
                headsign: raw.trip_headsign.unwrap_or_default(),
                direction,
            })
        })
        .collect()
}

fn read_stop_times(directory: &Path) -> Result<(Vec<StopTimeRecord>, GapReport), ScheduleError> {
    let table = require_table(directory, STOP_TIMES_FILE)?;
    table.require_columns(&STOP_TIMES_COLUMNS)?;
    let mut gaps = GapReport::default();
    let mut stop_times = Vec::new();
    for row in tqdm!(table.rows::<RawStopTimeRow>(), desc = "reading stop_times.txt") {
        let (line, raw) = row?;
        let stop_sequence: u32 = raw.stop_sequence.parse().map_err(|_| {
            let msg = format!(
                "line {line}: stop_sequence must be a non-negative integer, found '{}'",
                raw.stop_sequence
            );
            ScheduleError::feed_format(STOP_TIMES_FILE, msg)
        })?;
        let arrival = optional_time(line, raw.arrival_time.as_deref())?;
        let departure = optional_time(line, raw.departure_time.as_deref())?;
        let (arrival_time, departure_time) = match (arrival, departure) {
            (Some(arr), Some(dep)) => (arr, dep),
            (Some(t), None) | (None, Some(t)) => (t, t),
            (None, None) => {
                gaps.record(LookupGap::MissingStopTimes {
                    trip_id: raw.trip_id,
                    stop_id: raw.stop_id,
                });
                continue;
            }
        };
        stop_times.push(StopTimeRecord {
            trip_id: raw.trip_id,
            stop_id: raw.stop_id,
            stop_sequence,
            arrival_time,
            departure_time,
        });
    }
    eprintln!(); // end progress bar
    Ok((stop_times, gaps))
}

fn optional_time(line: u64, value: Option<&str>) -> Result<Option<u32>, ScheduleError> {
    match value {
        None => Ok(None),
        Some(v) => gtfs_time_ops::parse_gtfs_time(v)
            .map(Some)
            .map_err(|e| ScheduleError::feed_format(STOP_TIMES_FILE, format!("line {line}: {e}"))),
    }
}

fn gtfs_date(file: &str, line: u64, value: &str) -> Result<chrono::NaiveDate, ScheduleError> {
    date_deserialization_ops::parse_gtfs_date(value)
        .map_err(|e| ScheduleError::feed_format(file, format!("line {line}: {e}")))
}
