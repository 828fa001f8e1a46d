use std::path::PathBuf;

use itertools::Itertools;

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("GTFS feed is malformed in '{file}': {message}")]
    FeedFormat { file: String, message: String },
    #[error("invalid schedule configuration: {0}")]
    Configuration(String),
    #[error("failure reading from '{path}': {message}")]
    Read { path: PathBuf, message: String },
    #[error("failure writing to '{path}': {message}")]
    Write { path: PathBuf, message: String },
    #[error("failure serializing schedule: {0}")]
    Serialization(String),
    #[error("unknown timezone '{0}', expected an IANA identifier such as 'Europe/Paris'")]
    Timezone(String),
    #[error("error due to dataset contents: {0}")]
    InvalidData(String),
    #[error("errors encountered while generating schedules: {0}")]
    BatchProcessing(String),
}

impl ScheduleError {
    pub fn feed_format(file: &str, message: impl Into<String>) -> Self {
        ScheduleError::FeedFormat {
            file: file.to_string(),
            message: message.into(),
        }
    }
}

pub fn batch_processing_error(errors: &[ScheduleError]) -> ScheduleError {
    let concatenated = errors.iter().map(|e| e.to_string()).join("\n  ");
    ScheduleError::BatchProcessing(format!("[\n  {concatenated}\n]"))
}
