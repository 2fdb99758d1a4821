//! Calendar-date arithmetic
//!
//! Dates in herd records are date-only values interpreted as local midnight
//! in the timezone of the reference instant. Day differences are floored
//! millisecond spans, so any instant after midnight of a date puts that date
//! at `-1` days away.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{FlockError, Result};

/// Milliseconds in a calendar day
pub const DAY_MS: i64 = 86_400_000;

/// Format used for calendar dates in herd records
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display locale for labels and dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ar,
}

impl FromStr for Locale {
    type Err = FlockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            "ar" | "ar-sa" | "arabic" => Ok(Locale::Ar),
            other => Err(FlockError::config(format!("unknown locale: {}", other))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ar => write!(f, "ar"),
        }
    }
}

/// Parse a date-only `YYYY-MM-DD` string.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), CALENDAR_DATE_FORMAT)
        .map_err(|_| FlockError::invalid_date(s))
}

/// Local midnight of `date` in `tz`.
///
/// If midnight does not exist (DST gap), the UTC reading of midnight is used.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz.from_utc_datetime(&midnight),
    }
}

fn floor_days(delta: TimeDelta) -> i64 {
    delta.num_milliseconds().div_euclid(DAY_MS)
}

/// Whole days elapsed from local midnight of `birth_date` to `now`.
pub fn age_in_days<Tz: TimeZone>(birth_date: NaiveDate, now: &DateTime<Tz>) -> i64 {
    let born = start_of_day(birth_date, &now.timezone());
    floor_days(now.clone().signed_duration_since(born))
}

/// Signed whole days from `now` to local midnight of `date`.
///
/// Negative means the date is in the past (overdue).
pub fn days_until<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> i64 {
    let target = start_of_day(date, &now.timezone());
    floor_days(target.signed_duration_since(now.clone()))
}

/// Shift a calendar date by `delta_days`, saturating at the representable range.
pub fn shift_date(date: NaiveDate, delta_days: i64) -> NaiveDate {
    match TimeDelta::try_days(delta_days).and_then(|d| date.checked_add_signed(d)) {
        Some(shifted) => shifted,
        None if delta_days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const AR_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
    "نوفمبر", "ديسمبر",
];

/// Render a number with Arabic-Indic digits
pub fn arabic_digits(n: impl fmt::Display) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Short month/day rendering, e.g. `Jan 5` or `٥ يناير`.
pub fn format_display_date(date: NaiveDate, locale: Locale) -> String {
    let month = date.month0() as usize;
    match locale {
        Locale::En => format!("{} {}", EN_MONTHS[month], date.day()),
        Locale::Ar => format!("{} {}", arabic_digits(date.day()), AR_MONTHS[month]),
    }
}
