use chrono::{Days, NaiveDate};
use stopboard_core::util::date_deserialization_ops::APP_DATE_FORMAT;

use crate::schedule::ScheduleError;

/// contiguous range of service dates `[start, start + days - 1]` to generate
/// schedules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationWindow {
    start: NaiveDate,
    days: u32,
}

impl GenerationWindow {
    pub fn new(start: NaiveDate, days: u32) -> Result<GenerationWindow, ScheduleError> {
        if days == 0 {
            return Err(ScheduleError::Configuration(String::from(
                "generation window must cover at least one day",
            )));
        }
        // bounds check the last date once so that end_date() cannot overflow
        if start.checked_add_days(Days::new((days - 1) as u64)).is_none() {
            return Err(ScheduleError::Configuration(format!(
                "generation window of {days} days starting at {} ends past the last representable date",
                start.format(APP_DATE_FORMAT)
            )));
        }
        Ok(GenerationWindow { start, days })
    }

    /// the last date of the window, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        self.start + Days::new((self.days - 1) as u64)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take(self.days as usize).collect()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end_date()
    }
}

impl std::fmt::Display for GenerationWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.format(APP_DATE_FORMAT),
            self.end_date().format(APP_DATE_FORMAT)
        )
    }
}
