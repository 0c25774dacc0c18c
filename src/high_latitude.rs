//! Fallback times for Fajr and Isha when the twilight angle gives no usable
//! answer, typically at high latitudes around the summer solstice.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    params::{CalculationMethod, CalculationParameters, NightPortions},
    time::is_leap_year,
};

/// Latitude from which the Moonsighting Committee stops using twilight angles.
pub const SEASONAL_EXTREME_LATITUDE: f64 = 55.0;

/// Fajr offset before sunrise at extreme latitudes, in minutes.
const EXTREME_LATITUDE_FAJR_MINUTES: i64 = 90;

/// Share of the night after sunset used for Isha at extreme latitudes.
const EXTREME_LATITUDE_ISHA_SHARE: f64 = 0.4;

/// Latitude slopes (minutes per 55° of latitude) of the four anchor points
/// of the seasonal morning curve.
const MORNING_CURVE: [f64; 4] = [28.65, 19.44, 32.74, 48.10];

/// Same for the seasonal evening curve.
const EVENING_CURVE: [f64; 4] = [25.60, 2.050, -9.210, 6.140];

/// How the Fajr and Isha fallbacks are derived for one computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum FallbackPolicy {
    /// A fixed share of the night before sunrise and after sunset.
    NightPortion(NightPortions),
    /// The Moonsighting Committee's seasonal curves. At or above
    /// [`SEASONAL_EXTREME_LATITUDE`] fixed offsets are tried first.
    Seasonal { extreme_latitude: bool },
}

impl FallbackPolicy {
    pub(crate) fn new(params: &CalculationParameters, latitude: f64) -> Self {
        match params.method {
            CalculationMethod::MoonsightingCommittee => FallbackPolicy::Seasonal {
                extreme_latitude: latitude >= SEASONAL_EXTREME_LATITUDE,
            },
            _ => FallbackPolicy::NightPortion(params.night_portions()),
        }
    }

    /// Candidate that takes precedence over the geometric Fajr, if any.
    pub(crate) fn fajr_override(&self, sunrise: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            FallbackPolicy::Seasonal { extreme_latitude: true } => {
                sunrise.checked_sub_signed(TimeDelta::try_minutes(EXTREME_LATITUDE_FAJR_MINUTES)?)
            }
            _ => None,
        }
    }

    /// Candidate that takes precedence over the geometric Isha, if any.
    pub(crate) fn isha_override(&self, sunset: DateTime<Utc>, night: TimeDelta) -> Option<DateTime<Utc>> {
        match self {
            FallbackPolicy::Seasonal { extreme_latitude: true } => {
                let minutes = (night.num_minutes() as f64 * EXTREME_LATITUDE_ISHA_SHARE) as i64;
                sunset.checked_add_signed(TimeDelta::try_minutes(minutes)?)
            }
            _ => None,
        }
    }

    /// Earliest acceptable Fajr.
    pub(crate) fn safe_fajr(
        &self,
        latitude: f64,
        day_of_year: u32,
        year: i32,
        sunrise: DateTime<Utc>,
        night: TimeDelta,
    ) -> Option<DateTime<Utc>> {
        match self {
            FallbackPolicy::NightPortion(portions) => {
                sunrise.checked_sub_signed(night_share(night, portions.fajr)?)
            }
            FallbackPolicy::Seasonal { .. } => {
                season_adjusted_morning_twilight(latitude, day_of_year, year, sunrise)
            }
        }
    }

    /// Latest acceptable Isha.
    pub(crate) fn safe_isha(
        &self,
        latitude: f64,
        day_of_year: u32,
        year: i32,
        sunset: DateTime<Utc>,
        night: TimeDelta,
    ) -> Option<DateTime<Utc>> {
        match self {
            FallbackPolicy::NightPortion(portions) => sunset.checked_add_signed(night_share(night, portions.isha)?),
            FallbackPolicy::Seasonal { .. } => season_adjusted_evening_twilight(latitude, day_of_year, year, sunset),
        }
    }
}

/// `portion` of `night`, truncated to whole seconds.
fn night_share(night: TimeDelta, portion: f64) -> Option<TimeDelta> {
    TimeDelta::try_seconds((portion * night.num_seconds() as f64) as i64)
}

/// Days elapsed since the most recent winter solstice of the hemisphere.
///
/// The northern count starts on December 21 (ten days before January 1);
/// the southern count starts on June 21 (day 172 or 173 of the year).
///
/// # Arguments
/// * `day_of_year` - 1-based day of the year
/// * `year` - Gregorian year, for the leap-year rule
/// * `latitude` - Observer latitude; zero counts as northern
pub fn days_since_solstice(day_of_year: u32, year: i32, latitude: f64) -> u32 {
    let leap = is_leap_year(year);
    let days_in_year: i64 = if leap { 366 } else { 365 };
    let day_of_year = i64::from(day_of_year);

    let days = if latitude >= 0.0 {
        let days = day_of_year + 10;
        if days >= days_in_year {
            days - days_in_year
        } else {
            days
        }
    } else {
        let days = day_of_year - if leap { 173 } else { 172 };
        if days < 0 {
            days + days_in_year
        } else {
            days
        }
    };
    days as u32
}

/// Minutes given by a seasonal curve for `days` since the solstice.
///
/// The curve runs through four latitude-scaled anchors (a, b, c, d) and back,
/// with linear segments changing at days 91, 137, 183, 229 and 275.
fn seasonal_minutes(slopes: [f64; 4], latitude: f64, days: u32) -> f64 {
    let [a, b, c, d] = slopes.map(|slope| 75.0 + slope / 55.0 * latitude.abs());
    let days = f64::from(days);

    if days < 91.0 {
        a + (b - a) / 91.0 * days
    } else if days < 137.0 {
        b + (c - b) / 46.0 * (days - 91.0)
    } else if days < 183.0 {
        c + (d - c) / 46.0 * (days - 137.0)
    } else if days < 229.0 {
        d + (c - d) / 46.0 * (days - 183.0)
    } else if days < 275.0 {
        c + (b - c) / 46.0 * (days - 229.0)
    } else {
        b + (a - b) / 91.0 * (days - 275.0)
    }
}

fn seasonal_offset(slopes: [f64; 4], latitude: f64, day_of_year: u32, year: i32) -> Option<TimeDelta> {
    let minutes = seasonal_minutes(slopes, latitude, days_since_solstice(day_of_year, year, latitude));
    TimeDelta::try_seconds((minutes * 60.0).round() as i64)
}

/// Moonsighting Committee Fajr: sunrise minus a seasonal offset of 75
/// minutes or more.
pub fn season_adjusted_morning_twilight(
    latitude: f64,
    day_of_year: u32,
    year: i32,
    sunrise: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    sunrise.checked_sub_signed(seasonal_offset(MORNING_CURVE, latitude, day_of_year, year)?)
}

/// Moonsighting Committee Isha: sunset plus a seasonal offset.
pub fn season_adjusted_evening_twilight(
    latitude: f64,
    day_of_year: u32,
    year: i32,
    sunset: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    sunset.checked_add_signed(seasonal_offset(EVENING_CURVE, latitude, day_of_year, year)?)
}
