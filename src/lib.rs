//! Ordinal and ICU-backed string collation, plus Gregorian calendars with a
//! shifted year count such as the Thai Buddhist calendar.

pub mod calendar;
pub mod compare;
mod error;

pub use calendar::{CURRENT_ERA, DateTimeValue, EraDescriptor, ShiftedCalendar, ShiftedDate};
pub use compare::{Collator, CompareOptions};
pub use error::{GlobalizationError, Result};
