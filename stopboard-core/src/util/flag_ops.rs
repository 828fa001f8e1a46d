/// reads a GTFS boolean flag such as the weekday columns of calendar.txt.
///
/// only the two literal tokens `1` and `0` are recognized. anything else returns
/// None so that the caller can decide how to report it.
pub fn parse_gtfs_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_gtfs_flag;

    #[test]
    fn test_parse_gtfs_flag() {
        assert_eq!(parse_gtfs_flag("1"), Some(true));
        assert_eq!(parse_gtfs_flag(" 0"), Some(false));
        assert_eq!(parse_gtfs_flag(""), None);
        assert_eq!(parse_gtfs_flag("true"), None);
        assert_eq!(parse_gtfs_flag("2"), None);
    }
}
