use globalize::{CURRENT_ERA, DateTimeValue, ShiftedCalendar};
use proptest::prelude::*;

const OFFSET: i32 = 543;

fn is_leap_year(shifted_year: i32) -> bool {
    let year = shifted_year - OFFSET;
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(shifted_year: i32, month: i32) -> i32 {
    const LEAP: [i32; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    const COMMON: [i32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if is_leap_year(shifted_year) {
        LEAP[month as usize]
    } else {
        COMMON[month as usize]
    }
}

/// A valid Thai date: year, month, day-of-month as a fraction of the month.
fn thai_date() -> impl Strategy<Value = (i32, i32, i32, i32, i32, i32, i32)> {
    (1 + OFFSET..=9999 + OFFSET, 1..=12i32, 0.0..1.0f64, 0..24i32, 0..60i32, 0..60i32, 0..1000i32)
        .prop_map(|(year, month, frac, hour, minute, second, ms)| {
            let day = 1 + (frac * days_in_month(year, month) as f64) as i32;
            (year, month, day, hour, minute, second, ms)
        })
}

#[test]
fn max_supported_date_in_every_era() {
    let tbc = ShiftedCalendar::thai_buddhist();
    let year = 9999 + OFFSET;
    for &era in tbc.eras() {
        let dt = tbc.to_date_time(year, 12, 31, 23, 59, 59, 999, era).unwrap();
        let desired = tbc.to_date_time_current_era(year, 12, 31, 23, 59, 59, 999).unwrap();
        assert_eq!(dt, desired);
        assert_eq!(dt, tbc.max_supported());
    }
}

#[test]
fn min_supported_date_in_every_era() {
    let tbc = ShiftedCalendar::thai_buddhist();
    let min = tbc.min_supported();
    for &era in tbc.eras() {
        let dt = tbc.to_date_time(1 + OFFSET, 1, 1, 0, 0, 0, 0, era).unwrap();
        assert_eq!(dt, min);
    }
    assert_eq!(min, DateTimeValue::MIN);
}

#[test]
fn single_era() {
    assert_eq!(ShiftedCalendar::thai_buddhist().eras(), &[1]);
}

#[test]
fn unknown_era_is_rejected() {
    let tbc = ShiftedCalendar::thai_buddhist();
    let err = tbc.to_date_time(2567, 1, 1, 0, 0, 0, 0, 2).unwrap_err();
    assert!(err.is_invalid_era());
}

#[test]
fn out_of_range_fields() {
    let tbc = ShiftedCalendar::thai_buddhist();
    let cases = [
        (OFFSET, 12, 31, 23, 59, 59, 999),
        (10000 + OFFSET, 1, 1, 0, 0, 0, 0),
        (2567, 13, 1, 0, 0, 0, 0),
        (2566, 2, 29, 0, 0, 0, 0),
        (2567, 1, 32, 0, 0, 0, 0),
        (2567, 1, 1, 24, 0, 0, 0),
        (2567, 1, 1, 0, 0, 0, 1000),
    ];
    for (y, mo, d, h, mi, s, ms) in cases {
        let err = tbc.to_date_time(y, mo, d, h, mi, s, ms, CURRENT_ERA).unwrap_err();
        assert!(err.is_out_of_range(), "{y}-{mo}-{d} {h}:{mi}:{s}.{ms}");
    }
}

proptest! {
    #[test]
    fn era_matches_current_era((year, month, day, hour, minute, second, ms) in thai_date()) {
        let tbc = ShiftedCalendar::thai_buddhist();
        for &era in tbc.eras() {
            let dt = tbc.to_date_time(year, month, day, hour, minute, second, ms, era);
            let desired = tbc.to_date_time_current_era(year, month, day, hour, minute, second, ms);
            prop_assert!(dt.is_ok());
            prop_assert_eq!(dt, desired);
        }
    }

    #[test]
    fn shifted_fields_round_trip((year, month, day, hour, minute, second, ms) in thai_date()) {
        let tbc = ShiftedCalendar::thai_buddhist();
        let dt = tbc.to_date_time_current_era(year, month, day, hour, minute, second, ms).unwrap();
        let shifted = tbc.from_date_time(&dt).unwrap();
        prop_assert_eq!((shifted.year, shifted.month, shifted.day), (year, month, day));
        prop_assert_eq!(dt.year(), year - OFFSET);
        prop_assert_eq!((dt.hour(), dt.minute(), dt.second(), dt.millisecond()), (hour, minute, second, ms));
    }

    #[test]
    fn leap_years_follow_gregorian_rule(year in 1 + OFFSET..=9999 + OFFSET) {
        let tbc = ShiftedCalendar::thai_buddhist();
        prop_assert_eq!(tbc.is_leap_year(year, 1), Ok(is_leap_year(year)));
        prop_assert_eq!(tbc.days_in_month(year, 2, 1), Ok(days_in_month(year, 2)));
    }
}
