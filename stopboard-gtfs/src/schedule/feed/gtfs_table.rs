use std::{io::Cursor, path::Path};

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::schedule::ScheduleError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// a GTFS text table opened for reading, with its header row already consumed.
pub struct GtfsTable {
    pub file: &'static str,
    headers: StringRecord,
    reader: csv::Reader<Cursor<Vec<u8>>>,
}

impl GtfsTable {
    /// opens `file` inside of the feed directory. returns None when the file does
    /// not exist, leaving it to the caller to decide if the file is required.
    pub fn open(directory: &Path, file: &'static str) -> Result<Option<GtfsTable>, ScheduleError> {
        let path = directory.join(file);
        if !path.is_file() {
            return Ok(None);
        }
        let mut bytes = std::fs::read(&path).map_err(|e| ScheduleError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        GtfsTable::from_bytes(file, bytes).map(Some)
    }

    pub fn from_bytes(file: &'static str, bytes: Vec<u8>) -> Result<GtfsTable, ScheduleError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(Cursor::new(bytes));
        let headers = reader
            .headers()
            .map_err(|e| ScheduleError::feed_format(file, format!("unreadable header: {e}")))?
            .clone();
        Ok(GtfsTable {
            file,
            headers,
            reader,
        })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// fails with a feed format error naming the first missing column.
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), ScheduleError> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(ScheduleError::feed_format(
                self.file,
                format!("missing required column '{missing}'"),
            )),
            None => Ok(()),
        }
    }

    /// deserializes each row by header name, paired with its line number in the file.
    pub fn rows<R>(self) -> impl Iterator<Item = Result<(u64, R), ScheduleError>>
    where
        R: DeserializeOwned,
    {
        let GtfsTable {
            file,
            headers,
            reader,
        } = self;
        reader.into_records().map(move |result| {
            let record = result.map_err(|e| ScheduleError::feed_format(file, e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row = record
                .deserialize::<R>(Some(&headers))
                .map_err(|e| ScheduleError::feed_format(file, format!("line {line}: {e}")))?;
            Ok((line, row))
        })
    }
}
