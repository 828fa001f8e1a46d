use regex::Regex;

use crate::schedule::{materialize::ScheduleEntry, ScheduleError};

/// a commercial train number read from a trip id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainNumber {
    pub number: String,
    pub direction_label: String,
}

/// reads train numbers embedded in rail trip ids, such as `874111` in
/// `OCESN874111F`. the parity of the number gives the direction of travel.
#[derive(Debug, Clone)]
pub struct TrainNumberPolicy {
    trip_id_marker: String,
    pattern: Regex,
    odd_label: String,
    even_label: String,
}

impl TrainNumberPolicy {
    pub fn new(
        trip_id_marker: &str,
        odd_label: &str,
        even_label: &str,
    ) -> Result<TrainNumberPolicy, ScheduleError> {
        if trip_id_marker.is_empty() {
            return Err(ScheduleError::Configuration(String::from(
                "train_number.trip_id_marker must not be empty",
            )));
        }
        let pattern = Regex::new(&format!(r"{}(\d+)", regex::escape(trip_id_marker)))
            .map_err(|e| {
                ScheduleError::Configuration(format!(
                    "invalid train number marker '{trip_id_marker}': {e}"
                ))
            })?;
        Ok(TrainNumberPolicy {
            trip_id_marker: trip_id_marker.to_string(),
            pattern,
            odd_label: odd_label.to_string(),
            even_label: even_label.to_string(),
        })
    }

    /// the digits after the first occurrence of the marker that is followed by
    /// a digit.
    pub fn extract(&self, trip_id: &str) -> Option<TrainNumber> {
        let number = self.pattern.captures(trip_id)?.get(1)?.as_str().to_string();
        let last_digit = number.chars().last()?.to_digit(10)?;
        let direction_label = if last_digit % 2 == 1 {
            self.odd_label.clone()
        } else {
            self.even_label.clone()
        };
        Some(TrainNumber {
            number,
            direction_label,
        })
    }

    /// sets the train number and direction label of every entry whose trip id
    /// carries one. returns the number of annotated entries.
    pub fn annotate(&self, entries: &mut [ScheduleEntry]) -> usize {
        let mut annotated = 0;
        for entry in entries.iter_mut() {
            if let Some(train) = self.extract(&entry.trip_id) {
                entry.train_number = Some(train.number);
                entry.direction_label = Some(train.direction_label);
                annotated += 1;
            }
        }
        if annotated < entries.len() {
            log::warn!(
                "{} of {} schedule entries have no train number after '{}'",
                entries.len() - annotated,
                entries.len(),
                self.trip_id_marker
            );
        }
        annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> TrainNumberPolicy {
        TrainNumberPolicy::new("OCESN", "To Clermont", "From Clermont").unwrap()
    }

    #[test]
    fn test_extract_digits_after_marker() {
        let train = policy().extract("OCESN874111F-8_330891").unwrap();
        assert_eq!(train.number, "874111");
        assert_eq!(train.direction_label, "To Clermont");
        let train = policy().extract("OCESN874120R").unwrap();
        assert_eq!(train.direction_label, "From Clermont");
    }

    #[test]
    fn test_extract_without_number() {
        assert_eq!(policy().extract("T2C-123456"), None);
        assert_eq!(policy().extract("OCESNF874111"), None);
    }

    #[test]
    fn test_extract_skips_marker_without_digits() {
        let train = policy().extract("OCESNF-OCESN874120R").unwrap();
        assert_eq!(train.number, "874120");
        assert_eq!(train.direction_label, "From Clermont");
    }

    #[test]
    fn test_marker_is_matched_literally() {
        let policy = TrainNumberPolicy::new("TER.", "odd", "even").unwrap();
        assert_eq!(policy.extract("TERX123"), None);
        assert_eq!(policy.extract("TER.123").unwrap().number, "123");
        assert!(matches!(
            TrainNumberPolicy::new("", "odd", "even"),
            Err(ScheduleError::Configuration(_))
        ));
    }
}
