use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

/// the services running on each date of a generation window. a date with no
/// running service maps to an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveServiceDates(BTreeMap<NaiveDate, BTreeSet<String>>);

impl ActiveServiceDates {
    pub fn is_active(&self, date: &NaiveDate, service_id: &str) -> bool {
        self.0
            .get(date)
            .map(|services| services.contains(service_id))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NaiveDate, BTreeSet<String>)> for ActiveServiceDates {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, BTreeSet<String>)>>(iter: T) -> Self {
        ActiveServiceDates(iter.into_iter().collect())
    }
}
