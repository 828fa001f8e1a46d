use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rayon::prelude::*;

use super::{service_day, ScheduleEntry};
use crate::schedule::{
    calendar::{ActiveServiceDates, ServiceCalendar},
    projection::ProjectedStopTime,
    GapReport, LookupGap, ScheduleError,
};

/// expands projected stop-times over the active service dates. each date is
/// processed independently, and the result is sorted by arrival, then trip_id,
/// stop_id and date, so the output does not depend on thread scheduling.
///
/// trips whose service is unknown to the calendar are reported once per service.
pub fn materialize(
    active: &ActiveServiceDates,
    calendar: &ServiceCalendar,
    projected: &[ProjectedStopTime],
    timezone: &Tz,
) -> Result<(Vec<ScheduleEntry>, GapReport), ScheduleError> {
    let mut gaps = GapReport::default();
    let mut unknown_services: BTreeMap<&str, &str> = BTreeMap::new();
    for p in projected.iter() {
        if !calendar.knows_service(&p.trip.service_id) {
            unknown_services
                .entry(p.trip.service_id.as_str())
                .or_insert(p.trip.trip_id.as_str());
        }
    }
    for (service_id, trip_id) in unknown_services.into_iter() {
        gaps.record(LookupGap::UnknownService {
            trip_id: trip_id.to_string(),
            service_id: service_id.to_string(),
        });
    }

    let dates: Vec<_> = active.iter().collect();
    let per_date = dates
        .into_par_iter()
        .map(|(date, services)| -> Result<Vec<ScheduleEntry>, ScheduleError> {
            let mut entries = vec![];
            for p in projected.iter() {
                if services.contains(&p.trip.service_id) {
                    entries.push(entry_on_date(p, date, timezone)?);
                }
            }
            log::debug!("{date}: {} schedule entries", entries.len());
            Ok(entries)
        })
        .collect::<Result<Vec<Vec<ScheduleEntry>>, ScheduleError>>()?;

    let mut entries: Vec<ScheduleEntry> = per_date.into_iter().flatten().collect();
    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    log::info!(
        "materialized {} schedule entries over {} dates",
        entries.len(),
        active.len()
    );
    Ok((entries, gaps))
}

fn entry_on_date(
    projected: &ProjectedStopTime,
    date: &NaiveDate,
    timezone: &Tz,
) -> Result<ScheduleEntry, ScheduleError> {
    let stop_time = &projected.stop_time;
    let arrival = service_day::service_time_to_timestamp(date, stop_time.arrival_time, timezone)?;
    let departure =
        service_day::service_time_to_timestamp(date, stop_time.departure_time, timezone)?;
    Ok(ScheduleEntry::new(
        &projected.trip,
        stop_time,
        *date,
        arrival,
        departure,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{
        date::GenerationWindow,
        feed::{StopTimeRecord, TripRecord},
        LookupGapKind,
    };
    use chrono_tz::Europe::Paris;
    use gtfs_structures::Calendar;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn every_day(id: &str) -> Calendar {
        Calendar {
            id: id.to_string(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: true,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
        }
    }

    fn projected(trip_id: &str, service_id: &str, stop_id: &str, seconds: u32) -> ProjectedStopTime {
        ProjectedStopTime {
            trip: TripRecord::new(trip_id, "R1", service_id, "GERZAT Champfleuri", 0),
            stop_time: StopTimeRecord::new(trip_id, stop_id, 1, seconds, seconds + 30),
        }
    }

    fn run(projected: &[ProjectedStopTime]) -> (Vec<ScheduleEntry>, GapReport) {
        let calendar = vec![every_day("ALL")];
        let service_calendar = ServiceCalendar::new(&calendar, &[]);
        let window = GenerationWindow::new(date(2025, 11, 26), 2).unwrap();
        let active = service_calendar.resolve_window(&window);
        materialize(&active, &service_calendar, projected, &Paris).unwrap()
    }

    #[test]
    fn test_one_entry_per_trip_and_date() {
        let (entries, gaps) = run(&[projected("T1", "ALL", "S1", 7 * 3600)]);
        assert!(gaps.is_empty());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, date(2025, 11, 26));
        assert_eq!(entries[1].date, date(2025, 11, 27));
        assert_eq!(entries[1].arrival - entries[0].arrival, 86_400);
        assert_eq!(entries[0].departure - entries[0].arrival, 30);
    }

    #[test]
    fn test_sorted_by_arrival_then_trip_id() {
        let input = vec![
            projected("T9", "ALL", "S1", 8 * 3600),
            projected("T2", "ALL", "S1", 8 * 3600),
            projected("T5", "ALL", "S1", 6 * 3600),
            // 25:00 of the first date arrives after the 8:00 trips of that date
            projected("T1", "ALL", "S1", 25 * 3600),
        ];
        let (entries, _) = run(&input);
        let first_day: Vec<&str> = entries
            .iter()
            .take(4)
            .map(|e| e.trip_id.as_str())
            .collect();
        assert_eq!(first_day, vec!["T5", "T2", "T9", "T1"]);
        assert!(entries.windows(2).all(|w| w[0].arrival <= w[1].arrival));
    }

    #[test]
    fn test_output_is_deterministic() {
        let input: Vec<ProjectedStopTime> = (0..50)
            .map(|n| projected(&format!("T{n}"), "ALL", "S1", 5 * 3600 + (n % 7) * 600))
            .collect();
        let mut reversed = input.clone();
        reversed.reverse();
        let (a, _) = run(&input);
        let (b, _) = run(&reversed);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_unknown_service_is_reported_once() {
        let input = vec![
            projected("T1", "WINTER", "S1", 3600),
            projected("T2", "WINTER", "S1", 7200),
            projected("T3", "ALL", "S1", 7200),
        ];
        let (entries, gaps) = run(&input);
        assert_eq!(gaps.count(LookupGapKind::UnknownService), 1);
        assert!(entries.iter().all(|e| e.trip_id == "T3"));
    }
}
