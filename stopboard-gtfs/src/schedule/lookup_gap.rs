use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;

/// number of example gaps retained per report for the end-of-run summary.
const MAX_GAP_EXAMPLES: usize = 10;

/// a row that references something missing from the feed. the row is skipped and
/// the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupGap {
    /// stop_times.txt row whose trip_id is not in trips.txt
    UnknownTrip { trip_id: String, stop_id: String },
    /// trips.txt row whose service_id is in neither calendar.txt nor calendar_dates.txt
    UnknownService { trip_id: String, service_id: String },
    /// stop_times.txt row with neither an arrival_time nor a departure_time
    MissingStopTimes { trip_id: String, stop_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LookupGapKind {
    UnknownTrip,
    UnknownService,
    MissingStopTimes,
}

impl LookupGap {
    pub fn kind(&self) -> LookupGapKind {
        match self {
            LookupGap::UnknownTrip { .. } => LookupGapKind::UnknownTrip,
            LookupGap::UnknownService { .. } => LookupGapKind::UnknownService,
            LookupGap::MissingStopTimes { .. } => LookupGapKind::MissingStopTimes,
        }
    }
}

impl Display for LookupGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupGap::UnknownTrip { trip_id, stop_id } => write!(
                f,
                "stop time at stop '{stop_id}' references unknown trip '{trip_id}'"
            ),
            LookupGap::UnknownService {
                trip_id,
                service_id,
            } => write!(
                f,
                "trip '{trip_id}' references unknown service '{service_id}'"
            ),
            LookupGap::MissingStopTimes { trip_id, stop_id } => write!(
                f,
                "stop time for trip '{trip_id}' at stop '{stop_id}' has no arrival or departure time"
            ),
        }
    }
}

impl Display for LookupGapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LookupGapKind::UnknownTrip => "unknown trip",
            LookupGapKind::UnknownService => "unknown service",
            LookupGapKind::MissingStopTimes => "missing stop times",
        };
        write!(f, "{name}")
    }
}

/// accumulates per-row anomalies so they are reported once at the end of a run
/// instead of interrupting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapReport {
    counts: BTreeMap<LookupGapKind, usize>,
    examples: Vec<LookupGap>,
}

impl GapReport {
    pub fn record(&mut self, gap: LookupGap) {
        *self.counts.entry(gap.kind()).or_insert(0) += 1;
        if self.examples.len() < MAX_GAP_EXAMPLES {
            self.examples.push(gap);
        }
    }

    pub fn merge(&mut self, other: GapReport) {
        for (kind, count) in other.counts {
            *self.counts.entry(kind).or_insert(0) += count;
        }
        let room = MAX_GAP_EXAMPLES.saturating_sub(self.examples.len());
        self.examples.extend(other.examples.into_iter().take(room));
    }

    pub fn count(&self, kind: LookupGapKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn examples(&self) -> &[LookupGap] {
        &self.examples
    }

    /// one-line description of the gap counts, such as "3 unknown trip, 1 unknown service"
    pub fn summary(&self) -> String {
        self.counts
            .iter()
            .map(|(kind, count)| format!("{count} {kind}"))
            .join(", ")
    }

    /// writes the summary and the retained examples to the log as warnings.
    pub fn log_summary(&self, schedule_name: &str) {
        if self.is_empty() {
            log::info!("{schedule_name}: no lookup gaps");
            return;
        }
        log::warn!(
            "{schedule_name}: skipped {} rows due to lookup gaps ({})",
            self.total(),
            self.summary()
        );
        for gap in self.examples.iter() {
            log::warn!("{schedule_name}:   {gap}");
        }
    }
}
