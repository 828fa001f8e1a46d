mod feed_reader;
mod feed_records;
mod gtfs_feed;
mod gtfs_table;

pub use feed_reader::read_feed;
pub use feed_records::{StopTimeRecord, TripRecord};
pub use gtfs_feed::GtfsFeed;
