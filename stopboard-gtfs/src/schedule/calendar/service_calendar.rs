use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use gtfs_structures::{Calendar, CalendarDate, Exception};
use stopboard_core::util::date_deserialization_ops::APP_DATE_FORMAT;

use super::ActiveServiceDates;
use crate::schedule::date::{date_ops, GenerationWindow};

/// calendar exceptions that apply to a single date.
#[derive(Debug, Default)]
struct DateExceptions {
    added: BTreeSet<String>,
    removed: BTreeSet<String>,
}

/// resolves which services run on a date from the calendar.txt weekly patterns
/// and the calendar_dates.txt exceptions.
#[derive(Debug)]
pub struct ServiceCalendar<'a> {
    calendar: &'a [Calendar],
    exceptions: HashMap<NaiveDate, DateExceptions>,
    known_services: HashSet<&'a str>,
}

impl<'a> ServiceCalendar<'a> {
    pub fn new(calendar: &'a [Calendar], calendar_dates: &'a [CalendarDate]) -> Self {
        let mut exceptions: HashMap<NaiveDate, DateExceptions> = HashMap::new();
        for cd in calendar_dates.iter() {
            let entry = exceptions.entry(cd.date).or_default();
            match cd.exception_type {
                Exception::Added => entry.added.insert(cd.service_id.clone()),
                Exception::Deleted => entry.removed.insert(cd.service_id.clone()),
            };
        }
        let known_services = calendar
            .iter()
            .map(|c| c.id.as_str())
            .chain(calendar_dates.iter().map(|cd| cd.service_id.as_str()))
            .collect();
        Self {
            calendar,
            exceptions,
            known_services,
        }
    }

    /// the services running on this date. the weekly pattern is applied first,
    /// then removals, then additions, so an Added exception wins over a Removed
    /// exception for the same service and date regardless of row order.
    pub fn active_services(&self, date: &NaiveDate) -> BTreeSet<String> {
        let mut active: BTreeSet<String> = self
            .calendar
            .iter()
            .filter(|c| date_ops::calendar_contains(c, date) && date_ops::runs_on_weekday(c, date))
            .map(|c| c.id.clone())
            .collect();
        if let Some(exceptions) = self.exceptions.get(date) {
            for service_id in exceptions.removed.iter() {
                active.remove(service_id);
            }
            active.extend(exceptions.added.iter().cloned());
        }
        log::debug!(
            "{}: {} active services",
            date.format(APP_DATE_FORMAT),
            active.len()
        );
        active
    }

    pub fn resolve_window(&self, window: &GenerationWindow) -> ActiveServiceDates {
        window
            .dates()
            .into_iter()
            .map(|date| {
                let services = self.active_services(&date);
                (date, services)
            })
            .collect()
    }

    /// true if the service appears in calendar.txt or calendar_dates.txt.
    pub fn knows_service(&self, service_id: &str) -> bool {
        self.known_services.contains(service_id)
    }
}
