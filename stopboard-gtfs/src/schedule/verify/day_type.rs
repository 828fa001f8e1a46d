use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// the timetable class that applies to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub fn from_date(date: &NaiveDate) -> DayType {
        match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DayType::Weekday => "Monday-Friday",
            DayType::Saturday => "Saturday",
            DayType::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date() {
        let friday = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        assert_eq!(DayType::from_date(&friday), DayType::Weekday);
        assert_eq!(DayType::from_date(&friday.succ_opt().unwrap()), DayType::Saturday);
        let sunday = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(DayType::from_date(&sunday), DayType::Sunday);
    }
}
