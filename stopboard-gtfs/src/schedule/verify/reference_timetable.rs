use std::path::Path;

use regex::Regex;

use super::{DayType, ReferenceFormat};
use crate::schedule::ScheduleError;

/// a departure read from a printed timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// local departure time as "HH:MM"
    pub time: String,
    pub headsign: String,
    pub direction: u8,
}

/// departures of a printed timetable by day type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTimetable {
    pub weekday: Vec<ReferenceEntry>,
    pub saturday: Vec<ReferenceEntry>,
    pub sunday: Vec<ReferenceEntry>,
}

/// parser state while walking the lines of a timetable.
struct ParseState {
    section: Option<DayType>,
    direction: u8,
    last_hour: u32,
}

impl ReferenceTimetable {
    pub fn read(path: &Path, format: &ReferenceFormat) -> Result<ReferenceTimetable, ScheduleError> {
        let text = std::fs::read_to_string(path).map_err(|e| ScheduleError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        ReferenceTimetable::parse(&text, format)
    }

    /// reads departures from timetable text. section headers select the day
    /// type, direction headers select the direction, and the first time on any
    /// other line is a departure. lines before the first section header are
    /// ignored.
    pub fn parse(text: &str, format: &ReferenceFormat) -> Result<ReferenceTimetable, ScheduleError> {
        let time_pattern = Regex::new(r"\d{2}[.:]\d{2}")
            .map_err(|e| ScheduleError::InvalidData(format!("time pattern: {e}")))?;
        let note_pattern = Regex::new(r"^([a-z])\s")
            .map_err(|e| ScheduleError::InvalidData(format!("note pattern: {e}")))?;

        let mut timetable = ReferenceTimetable::default();
        let mut state = ParseState {
            section: None,
            direction: 0,
            last_hour: 0,
        };
        for line in text.lines().map(str::trim) {
            if contains_any(line, &format.weekday_markers) {
                state.section = Some(DayType::Weekday);
                continue;
            }
            if contains_any(line, &format.saturday_markers) {
                state = ParseState {
                    section: Some(DayType::Saturday),
                    direction: 0,
                    last_hour: 0,
                };
                continue;
            }
            if contains_any(line, &format.sunday_markers) {
                state = ParseState {
                    section: Some(DayType::Sunday),
                    direction: 0,
                    last_hour: 0,
                };
                continue;
            }
            if let Some(direction) = format.direction_for_line(line) {
                state.direction = direction;
                state.last_hour = 0;
                continue;
            }

            let section = match state.section {
                Some(section) => section,
                None => continue,
            };
            let time = match time_pattern.find(line) {
                Some(m) => m.as_str().replace('.', ":"),
                None => continue,
            };
            let hour: u32 = time[..2]
                .parse()
                .map_err(|e| ScheduleError::InvalidData(format!("time '{time}': {e}")))?;

            // return trips printed right after the evening departures without
            // their own header
            let switches = state.direction == 0
                && state.last_hour > format.direction_switch_after_hour
                && hour + format.direction_switch_hour_drop < state.last_hour;
            if switches {
                state.direction = 1;
                state.last_hour = hour;
            } else if hour > state.last_hour {
                state.last_hour = hour;
            }

            let note = note_pattern
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str());
            let entry = ReferenceEntry {
                time,
                headsign: format.headsign_for(state.direction, note),
                direction: state.direction,
            };
            timetable.entries_mut(section).push(entry);
        }
        log::info!(
            "read reference timetable with {} weekday, {} Saturday and {} Sunday departures",
            timetable.weekday.len(),
            timetable.saturday.len(),
            timetable.sunday.len()
        );
        Ok(timetable)
    }

    pub fn entries(&self, day_type: DayType) -> &[ReferenceEntry] {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }

    fn entries_mut(&mut self, day_type: DayType) -> &mut Vec<ReferenceEntry> {
        match day_type {
            DayType::Weekday => &mut self.weekday,
            DayType::Saturday => &mut self.saturday,
            DayType::Sunday => &mut self.sunday,
        }
    }
}

fn contains_any(line: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| line.contains(m.as_str()))
}
