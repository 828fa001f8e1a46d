use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use gtfs_structures::Calendar;

/// the current calendar date at the given timezone.
pub fn today_in(timezone: &Tz) -> NaiveDate {
    Utc::now().with_timezone(timezone).date_naive()
}

/// tests if the calendar entry's inclusive date range contains the date.
pub fn calendar_contains(calendar: &Calendar, date: &NaiveDate) -> bool {
    &calendar.start_date <= date && date <= &calendar.end_date
}

/// the calendar.txt weekday flags in Monday-first order, so that index 0 is
/// `monday` and index 6 is `sunday`.
pub fn weekday_flags(calendar: &Calendar) -> [bool; 7] {
    [
        calendar.monday,
        calendar.tuesday,
        calendar.wednesday,
        calendar.thursday,
        calendar.friday,
        calendar.saturday,
        calendar.sunday,
    ]
}

/// tests if the calendar entry runs on the weekday of this date.
pub fn runs_on_weekday(calendar: &Calendar, date: &NaiveDate) -> bool {
    let index = date.weekday().num_days_from_monday() as usize;
    weekday_flags(calendar)[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Weekday};

    fn create_calendar(flags: [bool; 7]) -> Calendar {
        Calendar {
            id: String::from("SVC"),
            monday: flags[0],
            tuesday: flags[1],
            wednesday: flags[2],
            thursday: flags[3],
            friday: flags[4],
            saturday: flags[5],
            sunday: flags[6],
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }

    #[test]
    fn test_weekday_index_is_monday_first() {
        // one flag set at a time, checked against a week starting Monday 2025-01-06
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(monday.weekday(), Weekday::Mon);
        for flag in 0..7 {
            let mut flags = [false; 7];
            flags[flag] = true;
            let calendar = create_calendar(flags);
            for offset in 0..7 {
                let date = monday + Days::new(offset as u64);
                assert_eq!(
                    runs_on_weekday(&calendar, &date),
                    flag == offset,
                    "flag {flag} on {date}"
                );
            }
        }
    }

    #[test]
    fn test_sunday_is_last_flag() {
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        let calendar = create_calendar([false, false, false, false, false, false, true]);
        assert!(runs_on_weekday(&calendar, &sunday));
        assert_eq!(weekday_flags(&calendar)[6], calendar.sunday);
    }

    #[test]
    fn test_calendar_contains_is_inclusive() {
        let calendar = create_calendar([true; 7]);
        assert!(calendar_contains(&calendar, &calendar.start_date));
        assert!(calendar_contains(&calendar, &calendar.end_date));
        let after = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(!calendar_contains(&calendar, &after));
    }
}
