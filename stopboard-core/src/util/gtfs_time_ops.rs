//! GTFS times of day are offsets from the start of the service day. hours are not
//! bounded by 23: `25:30:00` is half past one on the calendar day after the
//! service date, and must stay attributed to the service date.
use super::CodecError;

pub const SECONDS_PER_DAY: u32 = 86_400;

/// parses `H:MM:SS` or `HH:MM:SS` (any number of hour digits) into seconds since
/// the start of the service day.
pub fn parse_gtfs_time(time_str: &str) -> Result<u32, CodecError> {
    let invalid = || CodecError::InvalidGtfsTime(time_str.to_string());
    let mut parts = time_str.trim().split(':');
    let (h, m, s) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => (h, m, s),
        _ => return Err(invalid()),
    };
    if h.is_empty() || m.len() != 2 || s.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = parse_digits(h).ok_or_else(invalid)?;
    let minutes: u32 = parse_digits(m).ok_or_else(invalid)?;
    let seconds: u32 = parse_digits(s).ok_or_else(invalid)?;
    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }
    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)
}

/// renders seconds since the start of the service day back into `HH:MM:SS`,
/// keeping hours past 23.
pub fn format_gtfs_time(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regular_time() {
        assert_eq!(parse_gtfs_time("08:15:30").unwrap(), 8 * 3600 + 15 * 60 + 30);
        assert_eq!(parse_gtfs_time("7:05:00").unwrap(), 7 * 3600 + 5 * 60);
        assert_eq!(parse_gtfs_time(" 00:00:00 ").unwrap(), 0);
    }

    #[test]
    fn test_parse_past_midnight_time() {
        let seconds = parse_gtfs_time("25:05:00").unwrap();
        assert_eq!(seconds, 25 * 3600 + 5 * 60);
        assert!(seconds > SECONDS_PER_DAY);
    }

    #[test]
    fn test_parse_invalid_times() {
        for bad in ["", "12:00", "12:60:00", "12:00:61", "ab:00:00", "12:0:00", "1:2:3:4", "-1:00:00"] {
            assert!(parse_gtfs_time(bad).is_err(), "expected '{bad}' to fail");
        }
    }

    #[test]
    fn test_format_keeps_hours_past_23() {
        assert_eq!(format_gtfs_time(25 * 3600 + 5 * 60), "25:05:00");
        assert_eq!(format_gtfs_time(61), "00:01:01");
    }
}
