use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    high_latitude::FallbackPolicy,
    params::CalculationParameters,
    solver::{afternoon, DayEventTimes, SolverContext},
    time::{day_of_year, hours_to_instant},
    types::{CalculationError, Coordinates, Prayer},
};

/// Hours after Maghrib used for Midnight when the next Fajr is unknown.
const MIDNIGHT_FALLBACK_HOURS: i64 = 6;

/// The seven event times of one civil day, adjustments included.
///
/// A value only exists when every event was resolved; see
/// [`compute_prayer_times`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrayerTimes {
    pub fajr: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
    pub midnight: DateTime<Utc>,
}

impl PrayerTimes {
    pub fn time_for_prayer(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
            Prayer::Midnight => self.midnight,
        }
    }

    /// The latest event at or before `when`, or `None` before Fajr.
    pub fn current_prayer(&self, when: DateTime<Utc>) -> Option<Prayer> {
        Prayer::ALL
            .iter()
            .rev()
            .copied()
            .find(|&prayer| self.time_for_prayer(prayer) <= when)
    }

    /// The first event after [`Self::current_prayer`]; `None` once Midnight
    /// has passed.
    pub fn next_prayer(&self, when: DateTime<Utc>) -> Option<Prayer> {
        match self.current_prayer(when) {
            Some(prayer) => prayer.next(),
            None => Some(Prayer::Fajr),
        }
    }
}

/// Transit, sunrise and sunset of one day placed on the clock.
struct SolarDay {
    date: NaiveDate,
    context: SolverContext,
    transit: DateTime<Utc>,
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
}

impl SolarDay {
    fn new(coordinates: Coordinates, date: NaiveDate) -> Result<Self, CalculationError> {
        let context = SolverContext::for_date(coordinates, date)?;
        let events = DayEventTimes::from_context(&context);
        trace!(
            "{date}: transit {:.4}h, sunrise {:.4}h, sunset {:.4}h UT",
            events.transit,
            events.sunrise,
            events.sunset
        );

        Ok(Self {
            date,
            context,
            transit: hours_to_instant(date, events.transit).ok_or(CalculationError::IncompleteDay(Prayer::Dhuhr))?,
            sunrise: hours_to_instant(date, events.sunrise).ok_or(CalculationError::IncompleteDay(Prayer::Sunrise))?,
            sunset: hours_to_instant(date, events.sunset).ok_or(CalculationError::IncompleteDay(Prayer::Maghrib))?,
        })
    }

    /// From sunset to the same clock time as this morning's sunrise, one day later.
    fn night(&self) -> Result<TimeDelta, CalculationError> {
        let next_sunrise = self
            .sunrise
            .checked_add_signed(TimeDelta::try_days(1).ok_or(CalculationError::TimeConversionError)?)
            .ok_or(CalculationError::TimeConversionError)?;
        Ok(next_sunrise - self.sunset)
    }

    fn day_of_year(&self) -> u32 {
        day_of_year(self.date)
    }

    fn year(&self) -> i32 {
        self.date.year()
    }

    /// Geometric solution for a twilight `depression` below the horizon.
    fn twilight(&self, depression: f64, after_transit: bool) -> Option<DateTime<Utc>> {
        self.context
            .solve_hour_angle(-depression, after_transit)
            .and_then(|hours| hours_to_instant(self.date, hours))
    }
}

fn fajr(day: &SolarDay, params: &CalculationParameters, policy: &FallbackPolicy) -> Result<DateTime<Utc>, CalculationError> {
    let candidate = policy
        .fajr_override(day.sunrise)
        .or_else(|| day.twilight(params.fajr_angle, false));

    match candidate {
        Some(fajr) if fajr <= day.sunrise => Ok(fajr),
        _ => {
            debug!("{}: Fajr replaced by the high-latitude fallback", day.date);
            policy
                .safe_fajr(
                    day.context.observer.latitude,
                    day.day_of_year(),
                    day.year(),
                    day.sunrise,
                    day.night()?,
                )
                .ok_or(CalculationError::IncompleteDay(Prayer::Fajr))
        }
    }
}

fn isha(day: &SolarDay, params: &CalculationParameters, policy: &FallbackPolicy) -> Result<DateTime<Utc>, CalculationError> {
    if params.isha_interval > 0 {
        return add_minutes(day.sunset, i64::from(params.isha_interval));
    }

    let night = day.night()?;
    let safe = policy
        .safe_isha(
            day.context.observer.latitude,
            day.day_of_year(),
            day.year(),
            day.sunset,
            night,
        )
        .ok_or(CalculationError::IncompleteDay(Prayer::Isha))?;
    let candidate = policy
        .isha_override(day.sunset, night)
        .or_else(|| day.twilight(params.isha_angle, true));

    match candidate {
        Some(isha) if isha <= safe => Ok(isha),
        _ => {
            debug!("{}: Isha replaced by the high-latitude fallback", day.date);
            Ok(safe)
        }
    }
}

/// Midpoint between `maghrib` and the following day's Fajr.
fn midnight(
    coordinates: Coordinates,
    day: &SolarDay,
    maghrib: DateTime<Utc>,
    params: &CalculationParameters,
    policy: &FallbackPolicy,
) -> Result<DateTime<Utc>, CalculationError> {
    let next_fajr = day
        .date
        .succ_opt()
        .and_then(|tomorrow| SolarDay::new(coordinates, tomorrow).ok())
        .and_then(|tomorrow| fajr(&tomorrow, params, policy).ok());

    match next_fajr {
        Some(next_fajr) => {
            let half_night = TimeDelta::try_seconds((next_fajr - maghrib).num_seconds() / 2)
                .ok_or(CalculationError::TimeConversionError)?;
            maghrib
                .checked_add_signed(half_night)
                .ok_or(CalculationError::TimeConversionError)
        }
        None => {
            debug!("{}: next Fajr unavailable, Midnight set {MIDNIGHT_FALLBACK_HOURS}h after sunset", day.date);
            add_minutes(day.sunset, MIDNIGHT_FALLBACK_HOURS * 60)
        }
    }
}

fn add_minutes(time: DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>, CalculationError> {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| time.checked_add_signed(delta))
        .ok_or(CalculationError::TimeConversionError)
}

/// Computes the seven prayer times for the UT civil day `date`.
///
/// Fajr and Isha use the configured twilight angles unless that solution is
/// missing or falls outside its bound (sunrise for Fajr, the high-latitude
/// fallback for Isha), in which case the fallback is used. Midnight lies
/// halfway between Maghrib and the next day's Fajr. The configured
/// adjustments are added last.
///
/// # Errors
///
/// Returns an error for coordinates outside their ranges, non-finite angles,
/// or when any event of the day cannot be placed on the clock. No partial
/// result is ever returned.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use prayer_times_calculator::{compute_prayer_times, CalculationMethod, Coordinates};
///
/// let makkah = Coordinates::new(21.4225, 39.8262);
/// let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let params = CalculationMethod::UmmAlQura.parameters();
///
/// let times = compute_prayer_times(makkah, date, &params).unwrap();
/// assert!(times.fajr < times.sunrise);
/// assert_eq!((times.isha - times.maghrib).num_minutes(), 90);
/// ```
pub fn compute_prayer_times(
    coordinates: Coordinates,
    date: NaiveDate,
    params: &CalculationParameters,
) -> Result<PrayerTimes, CalculationError> {
    coordinates.validate()?;
    params.validate()?;

    let policy = FallbackPolicy::new(params, coordinates.latitude);
    let day = SolarDay::new(coordinates, date)?;

    let asr = hours_to_instant(date, afternoon(&day.context, params.madhab.shadow_length()))
        .ok_or(CalculationError::IncompleteDay(Prayer::Asr))?;
    let fajr = fajr(&day, params, &policy)?;
    let isha = isha(&day, params, &policy)?;

    let adjustments = &params.adjustments;
    let maghrib = add_minutes(day.sunset, i64::from(adjustments.maghrib))?;
    let midnight = midnight(coordinates, &day, maghrib, params, &policy)?;

    Ok(PrayerTimes {
        fajr: add_minutes(fajr, i64::from(adjustments.fajr))?,
        sunrise: add_minutes(day.sunrise, i64::from(adjustments.sunrise))?,
        dhuhr: add_minutes(day.transit, i64::from(adjustments.dhuhr))?,
        asr: add_minutes(asr, i64::from(adjustments.asr))?,
        maghrib,
        isha: add_minutes(isha, i64::from(adjustments.isha))?,
        midnight: add_minutes(midnight, i64::from(adjustments.midnight))?,
    })
}
