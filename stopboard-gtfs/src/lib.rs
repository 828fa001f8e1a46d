pub mod app;
pub mod schedule;
