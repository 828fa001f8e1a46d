mod codec_error;

pub mod date_deserialization_ops;
pub mod flag_ops;
pub mod gtfs_time_ops;

pub use codec_error::CodecError;
