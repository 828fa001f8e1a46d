pub mod fs_ops;
mod output_format;
mod schedule_csv_row;
mod schedule_writer;

pub use output_format::OutputFormat;
pub use schedule_writer::{read_schedule, serialize_schedule, write_schedule};
