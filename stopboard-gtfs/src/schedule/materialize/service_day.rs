use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;
use stopboard_core::util::date_deserialization_ops::APP_DATE_FORMAT;

use crate::schedule::ScheduleError;

/// local midnight of a service date in the home timezone.
pub fn service_day_origin(date: &NaiveDate, timezone: &Tz) -> Result<DateTime<Tz>, ScheduleError> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        ScheduleError::InvalidData(format!(
            "cannot build midnight of {}",
            date.format(APP_DATE_FORMAT)
        ))
    })?;
    timezone.from_local_datetime(&midnight).earliest().ok_or_else(|| {
        ScheduleError::InvalidData(format!(
            "midnight of {} does not exist in timezone {timezone}",
            date.format(APP_DATE_FORMAT)
        ))
    })
}

/// converts seconds since the service day's local midnight, possibly beyond
/// 24:00:00, into an absolute instant. the seconds are added to the wall clock
/// so that times before a daylight saving change keep their printed value. a
/// wall-clock time skipped by the change is counted from local midnight instead.
pub fn service_time_to_datetime(
    date: &NaiveDate,
    seconds: u32,
    timezone: &Tz,
) -> Result<DateTime<Tz>, ScheduleError> {
    let offset = Duration::seconds(seconds as i64);
    let wall_clock = date
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.checked_add_signed(offset));
    match wall_clock.and_then(|wc| timezone.from_local_datetime(&wc).earliest()) {
        Some(datetime) => Ok(datetime),
        None => Ok(service_day_origin(date, timezone)? + offset),
    }
}

/// the unix timestamp of a GTFS time on a service date.
pub fn service_time_to_timestamp(
    date: &NaiveDate,
    seconds: u32,
    timezone: &Tz,
) -> Result<i64, ScheduleError> {
    service_time_to_datetime(date, seconds, timezone).map(|dt| dt.timestamp())
}
