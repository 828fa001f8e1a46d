mod lookup_gap;
mod schedule_error;
mod schedule_plan;
mod schedule_target_config;
mod stop_times_export;
mod train_number;

pub mod calendar;
pub mod date;
pub mod feed;
pub mod materialize;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod verify;

pub use lookup_gap::{GapReport, LookupGap, LookupGapKind};
pub use schedule_error::{batch_processing_error, ScheduleError};
pub use schedule_plan::SchedulePlan;
pub use schedule_target_config::{RoutesConfig, ScheduleTargetConfig, TrainNumberConfig};
pub use stop_times_export::{
    collect_trip_stop_times, export_trip_stop_times, StopTimeDetail, TripStopTimes,
};
pub use train_number::{TrainNumber, TrainNumberPolicy};
