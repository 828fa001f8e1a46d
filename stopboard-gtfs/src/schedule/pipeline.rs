//! end-to-end schedule generation: read the feed, resolve active services,
//! project the tracked stop-times, materialize and publish.
use std::path::Path;

use chrono::NaiveDate;

use crate::schedule::{
    calendar::ServiceCalendar,
    date::{date_ops, GenerationWindow},
    feed::{self, GtfsFeed},
    materialize::{self, ScheduleEntry},
    output,
    projection::project_stop_times,
    verify::{verify_schedule, ReferenceTimetable, VerificationReport},
    GapReport, SchedulePlan, ScheduleError,
};

/// the outcome of generating one schedule.
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    pub window: GenerationWindow,
    pub entries: Vec<ScheduleEntry>,
    /// rows skipped while reading, projecting or materializing
    pub gaps: GapReport,
}

/// computes the schedule of a plan over the window starting at the reference
/// date. pure function of its inputs, nothing is written.
pub fn build_schedule(
    feed: &GtfsFeed,
    plan: &SchedulePlan,
    reference_date: NaiveDate,
) -> Result<ScheduleRun, ScheduleError> {
    let window = GenerationWindow::new(reference_date, plan.window_days)?;
    log::info!("{}: generating schedule for {window}", plan.name);

    let calendar = ServiceCalendar::new(&feed.calendar, &feed.calendar_dates);
    let (active, projection) = rayon::join(
        || calendar.resolve_window(&window),
        || project_stop_times(feed, &plan.projection),
    );
    if projection.is_empty() {
        return Err(ScheduleError::Configuration(format!(
            "schedule '{}': no stop times found for the configured routes and stops",
            plan.name
        )));
    }

    let (mut entries, materialize_gaps) =
        materialize::materialize(&active, &calendar, &projection.stop_times, &plan.timezone)?;
    if let Some(train_numbers) = &plan.train_numbers {
        train_numbers.annotate(&mut entries);
    }

    let mut gaps = feed.gaps.clone();
    gaps.merge(projection.gaps);
    gaps.merge(materialize_gaps);
    Ok(ScheduleRun {
        window,
        entries,
        gaps,
    })
}

/// reads the plan's feed, builds the schedule and publishes it. the reference
/// date defaults to today in the plan's timezone. the previous output is only
/// replaced when every step succeeds.
pub fn generate(
    plan: &SchedulePlan,
    reference_date: Option<NaiveDate>,
) -> Result<ScheduleRun, ScheduleError> {
    let reference_date = reference_date.unwrap_or_else(|| date_ops::today_in(&plan.timezone));
    let feed = feed::read_feed(&plan.gtfs_directory)?;
    let run = build_schedule(&feed, plan, reference_date)?;
    run.gaps.log_summary(&plan.name);
    output::write_schedule(&plan.output_file, &run.entries, plan.output_format)?;
    Ok(run)
}

/// compares the published schedule of a plan with a reference timetable over
/// `days` dates starting at the reference date.
pub fn verify(
    plan: &SchedulePlan,
    reference_file: &Path,
    days: u32,
    reference_date: Option<NaiveDate>,
) -> Result<VerificationReport, ScheduleError> {
    let reference_date = reference_date.unwrap_or_else(|| date_ops::today_in(&plan.timezone));
    let window = GenerationWindow::new(reference_date, days)?;
    let timetable = ReferenceTimetable::read(reference_file, &plan.reference)?;
    let entries = output::read_schedule(&plan.output_file, plan.output_format)?;
    log::info!(
        "{}: verifying {} published entries for {window}",
        plan.name,
        entries.len()
    );
    let report = verify_schedule(&timetable, &entries, &window.dates(), &plan.timezone);
    report.log_summary();
    Ok(report)
}

/// writes the full stop lists of the plan's trips.
pub fn export_stop_times(plan: &SchedulePlan, output_file: &Path) -> Result<usize, ScheduleError> {
    let feed = feed::read_feed(&plan.gtfs_directory)?;
    crate::schedule::export_trip_stop_times(&feed, &plan.projection, output_file)
}
