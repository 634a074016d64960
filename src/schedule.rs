use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Month, NaiveDate, NaiveDateTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::SessionDay;

static FORMATTED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<weekday>[A-Za-z]{3})\s+(?P<day>\d{1,2})(?:st|nd|rd|th)\s+(?P<month>[A-Za-z]+)\s+(?P<year>\d{4})\s*$")
        .expect("regex compiles")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid formatted date: {0:?}")]
    InvalidFormattedDate(String),
    #[error("Invalid session start date: {0:?}")]
    InvalidSessionDate(String),
}

/// Parses a "Weekday DayOrdinal Month Year" string such as
/// `Mon 1st January 2024`. When the weekday token disagrees with the date,
/// the date rolls forward to the next day with that weekday, so
/// `Mon 31st January 2024` resolves to Monday 5th February.
pub fn parse_formatted_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    let invalid = || ScheduleError::InvalidFormattedDate(value.to_string());
    let caps = FORMATTED_DATE.captures(value).ok_or_else(invalid)?;

    let weekday = Weekday::from_str(&caps["weekday"]).map_err(|_| invalid())?;
    let day = caps["day"].parse::<u32>().map_err(|_| invalid())?;
    let month = Month::from_str(&caps["month"]).map_err(|_| invalid())?;
    let year = caps["year"].parse::<i32>().map_err(|_| invalid())?;

    let date =
        NaiveDate::from_ymd_opt(year, month.number_from_month(), day).ok_or_else(invalid)?;
    let ahead = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(ahead)))
        .ok_or_else(invalid)
}

/// Full English month name of a formatted date, e.g. `January`.
pub fn month_name(value: &str) -> Result<String, ScheduleError> {
    parse_formatted_date(value).map(|date| date.format("%B").to_string())
}

/// Calendar date of a session timestamp, taken as written (no timezone
/// conversion).
pub fn parse_session_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local().date());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidSessionDate(value.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    MondayToFriday,
    DayRelease,
    Weekend,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [
        SessionType::MondayToFriday,
        SessionType::DayRelease,
        SessionType::Weekend,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionType::MondayToFriday => "Monday to Friday",
            SessionType::DayRelease => "Day Release",
            SessionType::Weekend => "Weekend",
        }
    }

    /// Exact, case-sensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    pub fn matches(&self, days: &[SessionDay]) -> Result<bool, ScheduleError> {
        match self {
            SessionType::MondayToFriday => is_weekday_session(days),
            SessionType::DayRelease => is_day_release(days),
            SessionType::Weekend => is_weekend_session(days),
        }
    }
}

/// Exactly five sessions, all on Monday to Friday.
pub fn is_weekday_session(days: &[SessionDay]) -> Result<bool, ScheduleError> {
    if days.len() != 5 {
        return Ok(false);
    }
    all_days(days, |weekday| {
        !matches!(weekday, Weekday::Sat | Weekday::Sun)
    })
}

/// More than one session and no two neighbouring sessions in the same ISO
/// week number. Only adjacent pairs are compared, and the ISO year is ignored.
pub fn is_day_release(days: &[SessionDay]) -> Result<bool, ScheduleError> {
    if days.len() <= 1 {
        return Ok(false);
    }

    let mut previous_week: Option<u32> = None;
    for day in days {
        let week = parse_session_date(&day.start_date)?.iso_week().week();
        if previous_week == Some(week) {
            return Ok(false);
        }
        previous_week = Some(week);
    }
    Ok(true)
}

/// Every session on a Saturday or Sunday. An empty schedule qualifies.
pub fn is_weekend_session(days: &[SessionDay]) -> Result<bool, ScheduleError> {
    all_days(days, |weekday| matches!(weekday, Weekday::Sat | Weekday::Sun))
}

fn all_days(
    days: &[SessionDay],
    predicate: impl Fn(Weekday) -> bool,
) -> Result<bool, ScheduleError> {
    for day in days {
        if !predicate(parse_session_date(&day.start_date)?.weekday()) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;

    fn days(dates: &[&str]) -> Vec<SessionDay> {
        dates
            .iter()
            .map(|d| SessionDay {
                start_date: d.to_string(),
                extra: Map::new(),
            })
            .collect()
    }

    #[test]
    fn test_parse_formatted_date() {
        assert_eq!(
            parse_formatted_date("Mon 1st January 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            parse_formatted_date("Tue 22nd October 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 22).unwrap()
        );
        assert_eq!(
            parse_formatted_date("Sat 3rd February 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_formatted_date_rejects_other_formats() {
        for value in [
            "2024-01-01",
            "1st January 2024",
            "Mon 1 January 2024",
            "Mon 31st February 2024",
            "Mon 1st Janvier 2024",
            "Xyz 1st January 2024",
            "",
        ] {
            assert_eq!(
                parse_formatted_date(value),
                Err(ScheduleError::InvalidFormattedDate(value.to_string())),
                "{value}"
            );
        }
    }

    #[test]
    fn test_parse_formatted_date_rolls_forward_to_weekday() {
        // 31st January 2024 is a Wednesday
        assert_eq!(
            parse_formatted_date("Mon 31st January 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
        );
        assert_eq!(month_name("Mon 31st January 2024").unwrap(), "February");
        assert_eq!(
            parse_formatted_date("Thu 1st February 2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name("Mon 1st January 2024").unwrap(), "January");
        assert_eq!(month_name("Wed 11th Dec 2024").unwrap(), "December");
    }

    #[test]
    fn test_parse_session_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_session_date("2024-01-01T09:00:00Z").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01T23:30:00-05:00").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01T09:00:00").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01 09:00:00").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01T09:00:00.000000").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01 09:00:00.5").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01 09:00").unwrap(), expected);
        assert_eq!(parse_session_date("2024-01-01T09:00").unwrap(), expected);
        assert!(matches!(
            parse_session_date("next tuesday"),
            Err(ScheduleError::InvalidSessionDate(_))
        ));
    }

    #[test]
    fn test_session_type_labels() {
        assert_eq!(
            SessionType::from_label("Monday to Friday"),
            Some(SessionType::MondayToFriday)
        );
        assert_eq!(SessionType::from_label("Day Release"), Some(SessionType::DayRelease));
        assert_eq!(SessionType::from_label("Weekend"), Some(SessionType::Weekend));
        assert_eq!(SessionType::from_label("weekend"), None);
        assert_eq!(SessionType::from_label("Evening"), None);
    }

    #[test]
    fn test_weekday_session() {
        let week = days(&[
            "2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05",
        ]);
        assert!(is_weekday_session(&week).unwrap());

        let with_saturday = days(&[
            "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06",
        ]);
        assert!(!is_weekday_session(&with_saturday).unwrap());

        let four_days = days(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
        assert!(!is_weekday_session(&four_days).unwrap());
    }

    #[test]
    fn test_weekday_session_only_checks_day_of_week() {
        // Wednesday to the following Tuesday, weekend skipped
        let across_weeks = days(&[
            "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-08", "2024-01-09",
        ]);
        assert_eq!(is_weekday_session(&across_weeks), Ok(true));
    }

    #[test]
    fn test_weekday_session_checks_count_before_dates() {
        let bad = days(&["garbage"]);
        assert_eq!(is_weekday_session(&bad), Ok(false));
    }

    #[test]
    fn test_day_release() {
        // Mondays in ISO weeks 1 and 3
        assert!(is_day_release(&days(&["2024-01-01", "2024-01-15"])).unwrap());
        assert!(!is_day_release(&days(&["2024-01-01", "2024-01-01"])).unwrap());
        assert!(!is_day_release(&days(&["2024-01-01", "2024-01-03"])).unwrap());
        assert!(!is_day_release(&days(&["2024-01-01"])).unwrap());
    }

    #[test]
    fn test_day_release_only_compares_neighbours() {
        let repeated = days(&["2024-01-01", "2024-01-08", "2024-01-02"]);
        assert!(is_day_release(&repeated).unwrap());
    }

    #[test]
    fn test_day_release_ignores_iso_year() {
        // Both dates fall in ISO week 1 of different years
        let across_years = days(&["2023-01-02", "2024-01-01"]);
        assert!(!is_day_release(&across_years).unwrap());
    }

    #[test]
    fn test_weekend_session() {
        assert!(is_weekend_session(&days(&["2024-02-03", "2024-02-04"])).unwrap());
        assert!(!is_weekend_session(&days(&["2024-02-03", "2024-02-05"])).unwrap());
        assert!(is_weekend_session(&[]).unwrap());
    }

    #[test]
    fn test_invalid_session_date_propagates() {
        let bad = days(&["2024-02-03", "not a date"]);
        assert_eq!(
            is_weekend_session(&bad),
            Err(ScheduleError::InvalidSessionDate("not a date".into()))
        );
    }
}
