use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Timelike, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub(crate) const J2000_EPOCH_JD: f64 = 2_451_545.0;

/// Days in a Julian century.
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Hour values outside this window cannot be placed on a civil day.
const MIN_EVENT_HOURS: f64 = -24.0;
const MAX_EVENT_HOURS: f64 = 48.0;

/// Compute the astronomical Julian Day for a Gregorian calendar date.
///
/// - `year`, `month`, `day`: civil date (month and day are 1-based).
/// - `hours`: time of day in UT hours. Values beyond 24 roll into the
///   following days, so `(2010, 1, 1, 48.0)` equals `(2010, 1, 3, 0.0)`.
pub fn julian_day(year: i32, month: u32, day: u32, hours: f64) -> f64 {
    let mut year = year;
    let mut month = month;

    // January and February count as months 13 and 14 of the previous year.
    if month < 3 {
        month += 12;
        year -= 1;
    }

    let day_decimal = f64::from(day) + hours / 24.0;
    let mut julian_day =
        (365.25 * (f64::from(year) + 4716.0)).floor() + (30.6001 * f64::from(month + 1)).floor() + day_decimal - 1524.5;

    // Gregorian calendar correction for dates on/after 1582-10-15
    if julian_day > 2_299_160.0 {
        let a = (f64::from(year) / 100.0).floor();
        julian_day += 2.0 - a + (a / 4.0).floor();
    }
    julian_day
}

/// Julian Day of an instant in any chrono `TimeZone`, including the
/// fractional part of the day.
pub fn julian_day_from_instant<T: TimeZone>(instant: &DateTime<T>) -> f64 {
    let utc = instant.naive_utc();
    let seconds = f64::from(utc.second()) + f64::from(utc.nanosecond()) / 1_000_000_000.0;
    let hours = f64::from(utc.hour()) + (f64::from(utc.minute()) + seconds / 60.0) / 60.0;
    julian_day(utc.year(), utc.month(), utc.day(), hours)
}

/// Julian Day at 00:00 UT of a civil date.
pub(crate) fn julian_day_from_date(date: NaiveDate) -> f64 {
    julian_day(date.year(), date.month(), date.day(), 0.0)
}

/// Julian century (T) from the given Julian Day (JD),
/// measured in Julian centuries since the J2000.0 epoch.
pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000_EPOCH_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 1-based day of the year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Places a fractional UT hour value on a civil day with minute resolution.
///
/// The whole hours are kept and the remaining fraction is rounded to the
/// nearest minute, so `10.1342` on 2015-07-12 becomes `2015-07-12 10:08 UTC`.
/// Negative values and values of 24 or more land on the neighbouring days.
///
/// # Returns
///
/// `None` if `hours` is not finite, lies outside `[-24, 48]`, or the result
/// leaves chrono's representable range.
pub fn hours_to_instant(date: NaiveDate, hours: f64) -> Option<DateTime<Utc>> {
    if !hours.is_finite() || !(MIN_EVENT_HOURS..=MAX_EVENT_HOURS).contains(&hours) {
        return None;
    }

    let whole_hours = hours.floor();
    let minutes = ((hours - whole_hours) * 60.0).round();
    let offset = TimeDelta::try_minutes(whole_hours as i64 * 60 + minutes as i64)?;

    let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    midnight.checked_add_signed(offset)
}
