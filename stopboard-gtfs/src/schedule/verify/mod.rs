mod day_type;
mod reference_format;
mod reference_timetable;
mod verifier;

pub use day_type::DayType;
pub use reference_format::{DirectionMarker, NoteHeadsign, ReferenceFormat};
pub use reference_timetable::{ReferenceEntry, ReferenceTimetable};
pub use verifier::{verify_schedule, DayVerification, Discrepancy, VerificationReport};
