use std::path::Path;

use super::{fs_ops, schedule_csv_row::ScheduleCsvRow, OutputFormat};
use crate::schedule::{materialize::ScheduleEntry, ScheduleError};

/// serializes entries in their given order.
pub fn serialize_schedule(
    entries: &[ScheduleEntry],
    format: OutputFormat,
) -> Result<Vec<u8>, ScheduleError> {
    match format {
        OutputFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(entries)
                .map_err(|e| ScheduleError::Serialization(e.to_string()))?;
            bytes.push(b'\n');
            Ok(bytes)
        }
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(true)
                .from_writer(vec![]);
            for entry in entries.iter() {
                writer
                    .serialize(ScheduleCsvRow::from(entry))
                    .map_err(|e| ScheduleError::Serialization(e.to_string()))?;
            }
            writer
                .into_inner()
                .map_err(|e| ScheduleError::Serialization(e.to_string()))
        }
    }
}

/// publishes the schedule at `path`, fully replacing any previous file. the
/// previous file is kept when serialization or writing fails.
pub fn write_schedule(
    path: &Path,
    entries: &[ScheduleEntry],
    format: OutputFormat,
) -> Result<(), ScheduleError> {
    let bytes = serialize_schedule(entries, format)?;
    fs_ops::write_atomically(path, &bytes)?;
    log::info!(
        "published {} schedule entries to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}

/// reads a schedule previously published with [`write_schedule`].
pub fn read_schedule(path: &Path, format: OutputFormat) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    let read_error = |message: String| ScheduleError::Read {
        path: path.to_path_buf(),
        message,
    };
    let bytes = std::fs::read(path).map_err(|e| read_error(e.to_string()))?;
    match format {
        OutputFormat::Json => serde_json::from_slice(&bytes)
            .map_err(|e| read_error(format!("failed to deserialize from JSON: {e}"))),
        OutputFormat::Csv => csv::Reader::from_reader(bytes.as_slice())
            .deserialize::<ScheduleCsvRow>()
            .map(|row| {
                let row = row.map_err(|e| read_error(format!("failed to deserialize CSV row: {e}")))?;
                ScheduleEntry::try_from(row)
            })
            .collect(),
    }
}
