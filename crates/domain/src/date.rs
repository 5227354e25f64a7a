use chrono::prelude::*;
use chrono::Duration;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateError {
    #[error("Date: `{0}` is malformed")]
    Malformed(String),
    #[error("Date: `{0}` is out of the supported range")]
    OutOfRange(String),
}

/// Parses either a plain `YYYY-MM-DD` date or a RFC 3339 timestamp, which is
/// how the hosted database hands out `date` and `timestamptz` columns.
pub fn parse_date(datestr: &str) -> Result<NaiveDate, InvalidDateError> {
    let datestr = datestr.trim();
    let date = match NaiveDate::parse_from_str(datestr, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => DateTime::parse_from_rfc3339(datestr)
            .map(|dt| dt.date_naive())
            .map_err(|_| InvalidDateError::Malformed(datestr.to_string()))?,
    };

    if !(1970..=2100).contains(&date.year()) {
        return Err(InvalidDateError::OutOfRange(datestr.to_string()));
    }

    Ok(date)
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Whole days from `today` to `date`, negative when `date` is in the past
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// The anniversary of `date` in `year`. A 29th of February falls on the
/// 28th in common years.
pub fn anniversary_in(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    let day = date.day().min(get_month_length(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
}

/// First anniversary of `date` that falls on or after `today`
pub fn next_anniversary(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(date, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        anniversary_in(date, today.year() + 1)
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
