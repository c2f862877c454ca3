use crate::calendar::model::EventKind;
use crate::config::Config;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

/// Parse time string in HH:MM or HH:MM:SS format.
///
/// Seconds are truncated; the pipeline works at minute precision.
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Combine a calendar day with a wall-clock time string.
///
/// Malformed time strings never fail the caller: the date's midnight is
/// returned unmodified and the condition is logged for diagnostics. No
/// timezone conversion happens anywhere in the pipeline; all times are
/// wall-clock local.
pub fn combine(date: NaiveDate, time_str: &str) -> NaiveDateTime {
    match parse_time(time_str).and_then(|(hour, minute)| date.and_hms_opt(hour, minute, 0)) {
        Some(datetime) => datetime,
        None => {
            warn!("Malformed time string {:?}, falling back to date {}", time_str, date);
            date.and_hms_opt(0, 0, 0).unwrap_or_default()
        }
    }
}

/// Default end time when a record carries no end time
pub fn default_end(start: NaiveDateTime, kind: EventKind, config: &Config) -> NaiveDateTime {
    let minutes = match kind {
        EventKind::Game => config.game_duration_min,
        EventKind::Training => config.training_duration_min,
    };
    start + Duration::minutes(i64::from(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_time() {
        // Valid cases
        assert_eq!(parse_time("00:00"), Some((0, 0)));
        assert_eq!(parse_time("12:30"), Some((12, 30)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));
        assert_eq!(parse_time("12:30:45"), Some((12, 30))); // Seconds truncated

        // Invalid cases
        assert_eq!(parse_time("24:00"), None); // Hour out of range
        assert_eq!(parse_time("12:60"), None); // Minute out of range
        assert_eq!(parse_time("12"), None); // Too few parts
        assert_eq!(parse_time("12:ab"), None); // Invalid minute
        assert_eq!(parse_time("ab:30"), None); // Invalid hour
        assert_eq!(parse_time("12:30:45:00"), None); // Too many parts
    }

    #[test]
    fn test_combine_keeps_calendar_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let result = combine(date, "19:45");

        assert_eq!(result.year(), 2025);
        assert_eq!(result.month(), 3);
        assert_eq!(result.day(), 17);
        assert_eq!(result.hour(), 19);
        assert_eq!(result.minute(), 45);
        assert_eq!(result.second(), 0);
    }

    #[test]
    fn test_combine_truncates_seconds() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let result = combine(date, "08:15:59");

        assert_eq!(result.hour(), 8);
        assert_eq!(result.minute(), 15);
        assert_eq!(result.second(), 0);
    }

    #[test]
    fn test_combine_falls_back_on_malformed_input() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();

        // Must not panic, must stay on the original date
        let result = combine(date, "25:xx");
        assert_eq!(result.date(), date);
        assert_eq!(result.hour(), 0);
        assert_eq!(result.minute(), 0);

        let result = combine(date, "");
        assert_eq!(result.date(), date);
    }

    #[test]
    fn test_default_end_durations() {
        let config = Config::default();
        let start = NaiveDate::from_ymd_opt(2025, 3, 17)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();

        let game_end = default_end(start, EventKind::Game, &config);
        assert_eq!(game_end - start, Duration::hours(2));

        let training_end = default_end(start, EventKind::Training, &config);
        assert_eq!(training_end - start, Duration::minutes(90));

        // start <= end holds on both paths
        assert!(start <= game_end);
        assert!(start <= training_end);
    }
}
