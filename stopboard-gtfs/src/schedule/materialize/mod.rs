mod materializer;
mod schedule_entry;
pub mod service_day;

pub use materializer::materialize;
pub use schedule_entry::ScheduleEntry;
