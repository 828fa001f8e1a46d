#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("'{0}' is not a valid GTFS date; YYYYMMDD format is expected")]
    InvalidGtfsDate(String),
    #[error("'{0}' is not a valid date; YYYY-MM-DD format is expected")]
    InvalidAppDate(String),
    #[error("'{0}' is not a valid GTFS time; H:MM:SS or HH:MM:SS format is expected")]
    InvalidGtfsTime(String),
}
