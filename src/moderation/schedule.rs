// Scheduled-review datetime handling.
//
// The admin enters date and time as two separate fields; they are combined
// into one UTC instant, validated client-side, and sent to the backend as
// ISO-8601. The backend forces status=draft until the scheduler re-surfaces
// the item.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("could not parse date '{0}' (expected YYYY-MM-DD)")]
    BadDate(String),
    #[error("could not parse time '{0}' (expected HH:MM or HH:MM:SS)")]
    BadTime(String),
    #[error("scheduled review must be in the future (got {0})")]
    InPast(DateTime<Utc>),
}

/// Combine date and time inputs into a validated future UTC instant.
pub fn combine_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, ScheduleError> {
    combine_date_time_at(date, time, Utc::now())
}

/// Same as [`combine_date_time`] with an injectable clock.
pub fn combine_date_time_at(
    date: &str,
    time: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::BadDate(date.to_string()))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .map_err(|_| ScheduleError::BadTime(time.to_string()))?;

    let at = Utc.from_utc_datetime(&date.and_time(time));
    if at <= now {
        return Err(ScheduleError::InPast(at));
    }
    Ok(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn combines_date_and_time_into_iso_instant() {
        let at = combine_date_time_at("2026-03-02", "09:30", now()).unwrap();
        assert_eq!(at.to_rfc3339(), "2026-03-02T09:30:00+00:00");
    }

    #[test]
    fn accepts_seconds_in_the_time_field() {
        let at = combine_date_time_at("2026-03-02", "09:30:15", now()).unwrap();
        assert_eq!(at.to_rfc3339(), "2026-03-02T09:30:15+00:00");
    }

    #[test]
    fn rejects_unparseable_inputs() {
        assert_eq!(
            combine_date_time_at("tomorrow", "09:30", now()),
            Err(ScheduleError::BadDate("tomorrow".to_string()))
        );
        assert_eq!(
            combine_date_time_at("2026-03-02", "morning", now()),
            Err(ScheduleError::BadTime("morning".to_string()))
        );
    }

    #[test]
    fn rejects_past_datetimes() {
        assert!(matches!(
            combine_date_time_at("2026-02-28", "09:30", now()),
            Err(ScheduleError::InPast(_))
        ));
    }
}
