//! Proleptic Gregorian rules and the canonical date/time value.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::error::{GlobalizationError, Result};

pub(crate) const MAX_YEAR: i32 = 9999;

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub(crate) fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

pub(crate) fn check_month(month: i32) -> Result<u32> {
    if !(1..=12).contains(&month) {
        return Err(GlobalizationError::out_of_range("month", "must be between 1 and 12"));
    }
    Ok(month as u32)
}

pub(crate) fn check_day(year: i32, month: u32, day: i32) -> Result<u32> {
    let max = days_in_month(year, month);
    if day < 1 || day as u32 > max {
        return Err(GlobalizationError::out_of_range(
            "day",
            format!("must be between 1 and {max} for {year:04}-{month:02}"),
        ));
    }
    Ok(day as u32)
}

fn check_field(value: i32, max: i32, param: &'static str) -> Result<u32> {
    if !(0..=max).contains(&value) {
        return Err(GlobalizationError::out_of_range(
            param,
            format!("must be between 0 and {max}"),
        ));
    }
    Ok(value as u32)
}

const fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
    let (Some(date), Some(time)) = (
        NaiveDate::from_ymd_opt(y, m, d),
        NaiveTime::from_hms_milli_opt(h, mi, s, ms),
    ) else {
        panic!("invalid constant date");
    };
    NaiveDateTime::new(date, time)
}

/// A date and time of day in the proleptic Gregorian calendar, with
/// millisecond precision, between [`DateTimeValue::MIN`] and
/// [`DateTimeValue::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeValue(NaiveDateTime);

impl DateTimeValue {
    pub const MIN: Self = Self(at(1, 1, 1, 0, 0, 0, 0));
    pub const MAX: Self = Self(at(MAX_YEAR, 12, 31, 23, 59, 59, 999));

    /// Midnight on January 1st of `year`. Only for years known to be valid.
    pub(crate) const fn start_of_year(year: i32) -> Self {
        Self(at(year, 1, 1, 0, 0, 0, 0))
    }

    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Result<Self> {
        if !(1..=MAX_YEAR).contains(&year) {
            return Err(GlobalizationError::out_of_range(
                "year",
                format!("must be between 1 and {MAX_YEAR}"),
            ));
        }
        let month = check_month(month)?;
        let day = check_day(year, month, day)?;
        let hour = check_field(hour, 23, "hour")?;
        let minute = check_field(minute, 59, "minute")?;
        let second = check_field(second, 59, "second")?;
        let millisecond = check_field(millisecond, 999, "millisecond")?;

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_milli_opt(hour, minute, second, millisecond))
            .map(Self)
            .ok_or_else(|| GlobalizationError::out_of_range("date", "not a representable date"))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> i32 {
        self.0.month() as i32
    }

    pub fn day(&self) -> i32 {
        self.0.day() as i32
    }

    pub fn hour(&self) -> i32 {
        self.0.hour() as i32
    }

    pub fn minute(&self) -> i32 {
        self.0.minute() as i32
    }

    pub fn second(&self) -> i32 {
        self.0.second() as i32
    }

    pub fn millisecond(&self) -> i32 {
        (self.0.nanosecond() / 1_000_000) as i32
    }

    pub fn day_of_year(&self) -> i32 {
        self.0.ordinal() as i32
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl TryFrom<NaiveDateTime> for DateTimeValue {
    type Error = GlobalizationError;

    /// Truncates below millisecond precision and rejects values outside the
    /// supported range.
    fn try_from(value: NaiveDateTime) -> Result<Self> {
        Self::new(
            value.year(),
            value.month() as i32,
            value.day() as i32,
            value.hour() as i32,
            value.minute() as i32,
            value.second() as i32,
            // chrono encodes a leap second as 1000+ ms
            ((value.nanosecond() / 1_000_000) as i32).min(999),
        )
    }
}

impl From<DateTimeValue> for NaiveDateTime {
    fn from(value: DateTimeValue) -> Self {
        value.0
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}
