//! Date and frequency evaluation.
//!
//! Calendar days are always taken in UTC: a completion logged at
//! `2024-01-10T23:30:00-05:00` belongs to 2024-01-11.

use crate::{Error, Habit, HabitFrequency, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

/// Weekday index with Sunday = 0 through Saturday = 6
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// UTC calendar day of a timestamp
pub fn calendar_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Is `habit` scheduled on `date`?
///
/// `Weekly` never matches: no rule for it has been defined, so such habits
/// are never counted as scheduled. `Custom` without a day list never
/// matches either.
pub fn is_scheduled(habit: &Habit, date: NaiveDate) -> bool {
    let day = weekday_index(date);
    match habit.frequency {
        HabitFrequency::Daily => true,
        HabitFrequency::Weekdays => (1..=5).contains(&day),
        HabitFrequency::Weekends => day == 0 || day == 6,
        HabitFrequency::Weekly => false,
        HabitFrequency::Custom => habit
            .custom_days
            .as_ref()
            .is_some_and(|days| days.contains(&day)),
    }
}

/// Parse a user supplied date or timestamp
///
/// Accepts `YYYY-MM-DD` (taken as midnight UTC) or RFC 3339 with any
/// offset, which is converted to UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::InvalidDate(format!("'{}': {}", input, e)))
}

/// Serde adapter for stored timestamps: accepts a bare `YYYY-MM-DD` day
/// as well as RFC 3339
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Parse a user supplied calendar day (`YYYY-MM-DD` or a full timestamp)
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    parse_timestamp(input).map(calendar_day)
}

/// Parse a comma separated list of weekday indices, e.g. `1,3,5`
pub fn parse_custom_days(input: &str) -> Result<Vec<u8>> {
    let mut days = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: u8 = part
            .parse()
            .map_err(|_| Error::InvalidValue(format!("'{}' is not a weekday index", part)))?;
        if day > 6 {
            return Err(Error::InvalidValue(format!(
                "weekday index {} out of range 0-6",
                day
            )));
        }
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days.sort_unstable();
    Ok(days)
}
