use crate::types::errors::TimestampError;
use crate::types::Timestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const SECONDS_TO_END_OF_DAY: i64 = 24 * 60 * 60 - 1;

enum Layout {
    Date(&'static str),
    DateTime(&'static str),
    Rfc3339
}

//NOTE: The order is part of the contract. An ambiguous value such as 01/02/2024 is always read as
//      day/month because that layout is tried before month/day.
const LAYOUTS: [Layout; 7] = [
    Layout::Date("%Y-%m-%d"),
    Layout::DateTime("%Y-%m-%dT%H:%M:%S"),
    Layout::DateTime("%Y-%m-%d %H:%M:%S"),
    Layout::Date("%d/%m/%Y"),
    Layout::Date("%m/%d/%Y"),
    Layout::Date("%Y/%m/%d"),
    Layout::Rfc3339
];

impl Layout {
    fn parse(&self, value: &str) -> Option<Timestamp> {
        match self {
            Layout::Date(format) => NaiveDate::parse_from_str(value, format)
                .ok()
                .map(start_of_day),
            Layout::DateTime(format) => NaiveDateTime::parse_from_str(value, format)
                .ok()
                .map(|date_time| date_time.and_utc()),
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|date_time| date_time.with_timezone(&Utc))
        }
    }
}

/// Parses a timestamp by trying each supported layout in order.
///
/// Date-only layouts resolve to midnight UTC and zone-less date-times are taken as UTC.
/// RFC 3339 values keep their instant and are converted to UTC.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, TimestampError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    LAYOUTS.iter()
        .find_map(|layout| layout.parse(value))
        .ok_or_else(|| TimestampError::Unrecognized(value.to_string()))
}

pub fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last whole second of the given day, used as the inclusive end of a reconciliation window.
pub fn end_of_day(date: NaiveDate) -> Timestamp {
    start_of_day(date) + TimeDelta::seconds(SECONDS_TO_END_OF_DAY)
}
