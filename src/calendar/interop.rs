use icu_calendar::{AnyCalendar, AnyCalendarKind, Date as IcuDate};

use super::{DateTimeValue, ShiftedCalendar};

fn calendar_code_to_icu_kind(code: &str) -> Option<AnyCalendarKind> {
    match code {
        "buddhist" => Some(AnyCalendarKind::Buddhist),
        "roc" => Some(AnyCalendarKind::Roc),
        _ => None,
    }
}

/// Era and year-of-era that ICU4X assigns to a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcuEraYear {
    pub era: String,
    pub year: i32,
}

impl ShiftedCalendar {
    /// The same date as ICU4X labels it, for calendars ICU4X also implements.
    pub fn icu_era_year(&self, dt: &DateTimeValue) -> Option<IcuEraYear> {
        let kind = calendar_code_to_icu_kind(self.descriptor().code.as_str())?;
        let iso_date = IcuDate::try_new_iso(dt.year(), dt.month() as u8, dt.day() as u8).ok()?;
        let cal = AnyCalendar::new(kind);
        let d = iso_date.to_any().to_calendar(cal);
        let yi = d.year();
        let e = yi.era()?;
        Some(IcuEraYear {
            era: e.era.to_string(),
            year: e.year,
        })
    }
}
