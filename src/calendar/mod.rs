//! Calendars that label proleptic Gregorian years with a constant offset and
//! a single era.
//!
//! Every variant is an [`EraDescriptor`] read by the same [`ShiftedCalendar`]
//! routines, so a new variant is a new constant and nothing else.

mod gregorian;
mod interop;

use chrono::{Months, Weekday};
use tinystr::{TinyAsciiStr, tinystr};
use tracing::trace;

pub use gregorian::DateTimeValue;
pub use interop::IcuEraYear;

use crate::error::{GlobalizationError, Result};
use gregorian::MAX_YEAR;

/// Era shorthand accepted wherever an era is: the calendar's current era.
pub const CURRENT_ERA: i32 = 0;

const MAX_MONTHS_ADDED: i32 = 120_000;

/// Immutable configuration of one shifted calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraDescriptor {
    /// CLDR calendar identifier, or a local name when CLDR has no
    /// equivalent solar calendar.
    pub code: TinyAsciiStr<8>,
    /// Shifted year = Gregorian year + `year_offset`.
    pub year_offset: i32,
    pub min_supported: DateTimeValue,
    /// Valid era identifiers; the first is the current era.
    pub eras: &'static [i32],
    /// Upper bound of the century window for two-digit years; `None` when
    /// two-digit years are already full years.
    pub two_digit_year_max: Option<i32>,
}

pub const THAI_BUDDHIST: EraDescriptor = EraDescriptor {
    code: tinystr!(8, "buddhist"),
    year_offset: 543,
    min_supported: DateTimeValue::MIN,
    eras: &[1],
    two_digit_year_max: Some(2572),
};

pub const KOREAN: EraDescriptor = EraDescriptor {
    code: tinystr!(8, "korean"),
    year_offset: 2333,
    min_supported: DateTimeValue::MIN,
    eras: &[1],
    two_digit_year_max: Some(4362),
};

pub const TAIWAN: EraDescriptor = EraDescriptor {
    code: tinystr!(8, "roc"),
    year_offset: -1911,
    min_supported: DateTimeValue::start_of_year(1912),
    eras: &[1],
    two_digit_year_max: None,
};

/// A date in a shifted calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftedDate {
    pub era: i32,
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedCalendar {
    descriptor: EraDescriptor,
}

impl ShiftedCalendar {
    pub const fn new(descriptor: EraDescriptor) -> Self {
        Self { descriptor }
    }

    pub const fn thai_buddhist() -> Self {
        Self::new(THAI_BUDDHIST)
    }

    pub const fn korean() -> Self {
        Self::new(KOREAN)
    }

    pub const fn taiwan() -> Self {
        Self::new(TAIWAN)
    }

    pub fn descriptor(&self) -> &EraDescriptor {
        &self.descriptor
    }

    pub fn eras(&self) -> &'static [i32] {
        self.descriptor.eras
    }

    pub fn min_supported(&self) -> DateTimeValue {
        self.descriptor.min_supported
    }

    pub fn max_supported(&self) -> DateTimeValue {
        DateTimeValue::MAX
    }

    fn current_era(&self) -> i32 {
        self.descriptor.eras.first().copied().unwrap_or(1)
    }

    fn min_year(&self) -> i32 {
        self.descriptor.min_supported.year() + self.descriptor.year_offset
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR + self.descriptor.year_offset
    }

    fn check_era(&self, era: i32) -> Result<()> {
        if era == CURRENT_ERA || self.descriptor.eras.contains(&era) {
            Ok(())
        } else {
            Err(GlobalizationError::InvalidEra(era))
        }
    }

    /// Gregorian year for a shifted `year` in `era`.
    fn gregorian_year(&self, year: i32, era: i32) -> Result<i32> {
        self.check_era(era)?;
        let (min, max) = (self.min_year(), self.max_year());
        if !(min..=max).contains(&year) {
            return Err(GlobalizationError::out_of_range(
                "year",
                format!("must be between {min} and {max}"),
            ));
        }
        Ok(year - self.descriptor.year_offset)
    }

    fn check_supported(&self, dt: &DateTimeValue) -> Result<()> {
        if *dt < self.descriptor.min_supported {
            return Err(GlobalizationError::out_of_range(
                "time",
                format!("must not be earlier than {}", self.descriptor.min_supported),
            ));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn to_date_time(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
        era: i32,
    ) -> Result<DateTimeValue> {
        let gregorian_year = self.gregorian_year(year, era)?;
        trace!(calendar = %self.descriptor.code, year, gregorian_year, "to_date_time");
        DateTimeValue::new(gregorian_year, month, day, hour, minute, second, millisecond)
    }

    /// [`Self::to_date_time`] in the current era.
    pub fn to_date_time_current_era(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Result<DateTimeValue> {
        self.to_date_time(year, month, day, hour, minute, second, millisecond, CURRENT_ERA)
    }

    pub fn from_date_time(&self, dt: &DateTimeValue) -> Result<ShiftedDate> {
        self.check_supported(dt)?;
        Ok(ShiftedDate {
            era: self.current_era(),
            year: dt.year() + self.descriptor.year_offset,
            month: dt.month(),
            day: dt.day(),
        })
    }

    pub fn year_of(&self, dt: &DateTimeValue) -> Result<i32> {
        self.from_date_time(dt).map(|d| d.year)
    }

    pub fn month_of(&self, dt: &DateTimeValue) -> Result<i32> {
        self.from_date_time(dt).map(|d| d.month)
    }

    pub fn day_of_month(&self, dt: &DateTimeValue) -> Result<i32> {
        self.from_date_time(dt).map(|d| d.day)
    }

    pub fn era_of(&self, dt: &DateTimeValue) -> Result<i32> {
        self.from_date_time(dt).map(|d| d.era)
    }

    pub fn day_of_year(&self, dt: &DateTimeValue) -> Result<i32> {
        self.check_supported(dt)?;
        Ok(dt.day_of_year())
    }

    pub fn day_of_week(&self, dt: &DateTimeValue) -> Result<Weekday> {
        self.check_supported(dt)?;
        Ok(dt.weekday())
    }

    pub fn is_leap_year(&self, year: i32, era: i32) -> Result<bool> {
        Ok(gregorian::is_leap_year(self.gregorian_year(year, era)?))
    }

    pub fn is_leap_month(&self, year: i32, month: i32, era: i32) -> Result<bool> {
        self.gregorian_year(year, era)?;
        gregorian::check_month(month)?;
        Ok(false)
    }

    pub fn is_leap_day(&self, year: i32, month: i32, day: i32, era: i32) -> Result<bool> {
        let y = self.gregorian_year(year, era)?;
        let m = gregorian::check_month(month)?;
        let d = gregorian::check_day(y, m, day)?;
        Ok(m == 2 && d == 29)
    }

    /// Always 0: these calendars have no leap months.
    pub fn leap_month(&self, year: i32, era: i32) -> Result<i32> {
        self.gregorian_year(year, era)?;
        Ok(0)
    }

    pub fn days_in_month(&self, year: i32, month: i32, era: i32) -> Result<i32> {
        let y = self.gregorian_year(year, era)?;
        let m = gregorian::check_month(month)?;
        Ok(gregorian::days_in_month(y, m) as i32)
    }

    pub fn days_in_year(&self, year: i32, era: i32) -> Result<i32> {
        Ok(gregorian::days_in_year(self.gregorian_year(year, era)?) as i32)
    }

    pub fn months_in_year(&self, year: i32, era: i32) -> Result<i32> {
        self.gregorian_year(year, era)?;
        Ok(12)
    }

    /// Adds calendar months, clamping the day to the length of the target
    /// month.
    pub fn add_months(&self, dt: &DateTimeValue, months: i32) -> Result<DateTimeValue> {
        if !(-MAX_MONTHS_ADDED..=MAX_MONTHS_ADDED).contains(&months) {
            return Err(GlobalizationError::out_of_range(
                "months",
                format!("must be between -{MAX_MONTHS_ADDED} and {MAX_MONTHS_ADDED}"),
            ));
        }
        self.check_supported(dt)?;
        let naive = dt.as_naive();
        let shifted = if months >= 0 {
            naive.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            naive.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        let result = shifted
            .ok_or_else(|| GlobalizationError::out_of_range("months", "result is not representable"))
            .and_then(DateTimeValue::try_from)?;
        self.check_supported(&result)?;
        Ok(result)
    }

    pub fn add_years(&self, dt: &DateTimeValue, years: i32) -> Result<DateTimeValue> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| GlobalizationError::out_of_range("years", "too large"))?;
        self.add_months(dt, months)
    }

    /// Expands a two-digit year into the century window ending at
    /// `two_digit_year_max`.
    pub fn to_four_digit_year(&self, year: i32) -> Result<i32> {
        let Some(window_max) = self.descriptor.two_digit_year_max else {
            if year <= 0 || year > self.max_year() {
                return Err(GlobalizationError::out_of_range(
                    "year",
                    format!("must be between 1 and {}", self.max_year()),
                ));
            }
            return Ok(year);
        };
        if year < 0 {
            return Err(GlobalizationError::out_of_range("year", "must be non-negative"));
        }
        if year < 100 {
            let century = window_max / 100 - i32::from(year > window_max % 100);
            return Ok(century * 100 + year);
        }
        if year < self.min_year() || year > self.max_year() {
            return Err(GlobalizationError::out_of_range(
                "year",
                format!("must be between {} and {}", self.min_year(), self.max_year()),
            ));
        }
        Ok(year)
    }
}

impl Default for ShiftedCalendar {
    fn default() -> Self {
        Self::thai_buddhist()
    }
}
