//! Pure helpers that are not tied to the character schema.

pub mod datetime;

pub use datetime::{parse_date_time, parse_time, DateTimeParseError, OffsetTime, TIME_ANCHOR_DATE};
