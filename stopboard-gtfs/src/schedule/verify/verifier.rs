use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use stopboard_core::util::date_deserialization_ops::APP_DATE_FORMAT;

use super::{DayType, ReferenceEntry, ReferenceTimetable};
use crate::schedule::materialize::ScheduleEntry;

/// a reference departure with no matching entry in the published schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub date: NaiveDate,
    pub expected: ReferenceEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayVerification {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub matched: usize,
    pub missing: Vec<Discrepancy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub days: Vec<DayVerification>,
}

impl VerificationReport {
    pub fn discrepancies(&self) -> impl Iterator<Item = &Discrepancy> {
        self.days.iter().flat_map(|d| d.missing.iter())
    }

    pub fn is_consistent(&self) -> bool {
        self.discrepancies().next().is_none()
    }

    pub fn log_summary(&self) {
        for day in self.days.iter() {
            let date = day.date.format(APP_DATE_FORMAT);
            if day.missing.is_empty() {
                log::info!("{date} ({}): all {} departures found", day.day_type, day.matched);
                continue;
            }
            log::warn!(
                "{date} ({}): {} departures missing, {} found",
                day.day_type,
                day.missing.len(),
                day.matched
            );
            for d in day.missing.iter() {
                log::warn!(
                    "  missing {} direction {} ({})",
                    d.expected.time,
                    d.expected.direction,
                    d.expected.headsign
                );
            }
        }
    }
}

/// checks every reference departure for each date against the published
/// entries of that date and direction, comparing local departure times as
/// "HH:MM". each published entry satisfies at most one reference departure.
pub fn verify_schedule(
    timetable: &ReferenceTimetable,
    entries: &[ScheduleEntry],
    dates: &[NaiveDate],
    timezone: &Tz,
) -> VerificationReport {
    let days = dates
        .iter()
        .map(|date| {
            let day_type = DayType::from_date(date);
            let mut available: HashMap<(u8, String), usize> = HashMap::new();
            for entry in entries.iter().filter(|e| &e.date == date) {
                if let Some(time) = local_hhmm(entry.departure, timezone) {
                    *available.entry((entry.direction, time)).or_insert(0) += 1;
                }
            }
            let mut matched = 0;
            let mut missing = vec![];
            for expected in timetable.entries(day_type).iter() {
                let key = (expected.direction, expected.time.clone());
                match available.get_mut(&key) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        matched += 1;
                    }
                    _ => missing.push(Discrepancy {
                        date: *date,
                        expected: expected.clone(),
                    }),
                }
            }
            DayVerification {
                date: *date,
                day_type,
                matched,
                missing,
            }
        })
        .collect();
    VerificationReport { days }
}

fn local_hhmm(timestamp: i64, timezone: &Tz) -> Option<String> {
    timezone
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{
        feed::{StopTimeRecord, TripRecord},
        materialize::service_day::service_time_to_timestamp,
    };
    use chrono_tz::Europe::Paris;

    fn reference(time: &str, direction: u8) -> ReferenceEntry {
        ReferenceEntry {
            time: time.to_string(),
            headsign: String::from("GERZAT Champfleuri"),
            direction,
        }
    }

    fn published(trip_id: &str, date: NaiveDate, seconds: u32, direction: u8) -> ScheduleEntry {
        let trip = TripRecord::new(trip_id, "B", "WK", "GERZAT Champfleuri", direction);
        let stop_time = StopTimeRecord::new(trip_id, "JAUDE", 1, seconds, seconds);
        let ts = service_time_to_timestamp(&date, seconds, &Paris).unwrap();
        ScheduleEntry::new(&trip, &stop_time, date, ts, ts)
    }

    #[test]
    fn test_reports_every_unmatched_departure() {
        // 2025-11-26 is a Wednesday
        let date = NaiveDate::from_ymd_opt(2025, 11, 26).unwrap();
        let timetable = ReferenceTimetable {
            weekday: vec![
                reference("07:00", 0),
                reference("07:00", 0),
                reference("07:30", 1),
                reference("08:00", 0),
            ],
            ..Default::default()
        };
        let entries = vec![
            published("T1", date, 7 * 3600, 0),
            published("T2", date, 7 * 3600 + 1800, 0),
            published("T3", date, 8 * 3600, 0),
        ];
        let report = verify_schedule(&timetable, &entries, &[date], &Paris);
        assert_eq!(report.days.len(), 1);
        let day = &report.days[0];
        assert_eq!(day.day_type, DayType::Weekday);
        assert_eq!(day.matched, 2);
        // the duplicate 07:00 and the 07:30 in the wrong direction
        let missing: Vec<(&str, u8)> = day
            .missing
            .iter()
            .map(|d| (d.expected.time.as_str(), d.expected.direction))
            .collect();
        assert_eq!(missing, vec![("07:00", 0), ("07:30", 1)]);
        assert!(!report.is_consistent());
    }

    #[test]
    fn test_uses_day_type_of_each_date() {
        let saturday = NaiveDate::from_ymd_opt(2025, 11, 29).unwrap();
        let timetable = ReferenceTimetable {
            weekday: vec![reference("06:00", 0)],
            saturday: vec![reference("09:05", 1)],
            ..Default::default()
        };
        let entries = vec![published("T1", saturday, 9 * 3600 + 300, 1)];
        let report = verify_schedule(&timetable, &entries, &[saturday], &Paris);
        assert!(report.is_consistent());
        assert_eq!(report.days[0].matched, 1);
    }
}
