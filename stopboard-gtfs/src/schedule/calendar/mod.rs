mod active_service_dates;
mod service_calendar;

pub use active_service_dates::ActiveServiceDates;
pub use service_calendar::ServiceCalendar;
