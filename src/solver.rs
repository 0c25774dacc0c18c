//! Transit and hour-angle solutions for one observer and one civil day.
//!
//! Every solution is expressed in UT hours from 00:00 of the day the
//! [`SolverContext`] was built for. Values below zero or above 24 belong to
//! the neighbouring days.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use chrono::NaiveDate;

use crate::{
    geo::{altitude_of_celestial_body, SolarCoordinates},
    math::{closest_angle, interpolate_angles, interpolate_value, normalize_with_bound, safe_acos, safe_atan, safe_tan, unwind_angle},
    params::ShadowLength,
    time::julian_day_from_date,
    types::{CalculationError, Coordinates},
};

/// Altitude of the Sun's upper limb at sunrise and sunset (degrees),
/// including standard refraction.
pub const STANDARD_SUN_ALTITUDE: f64 = -50.0 / 60.0;

/// Sidereal degrees turned per solar day, as used by the refinement step.
const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985647;

/// Offset from transit (in days) reported when the target altitude is
/// never reached.
const NO_SOLUTION_OFFSET_DAYS: f64 = 0.25;

/// Largest correction (in days) the refinement step may apply.
const MAX_CORRECTION_DAYS: f64 = 0.5;

/// Denominators below this magnitude are treated as zero.
const DEGENERATE_EPSILON: f64 = 1e-10;

/// Fraction of the day at which the Sun is expected to cross the meridian.
///
/// # Arguments
/// * `longitude` - Observer longitude in degrees, positive east
/// * `sidereal_time` - Apparent sidereal time at 0h UT in degrees
/// * `right_ascension` - Right ascension of the Sun in degrees
///
/// # Returns
/// m0 in `[0, 1)`
pub fn approximate_transit(longitude: f64, sidereal_time: f64, right_ascension: f64) -> f64 {
    let longitude_west = -longitude;
    normalize_with_bound((right_ascension + longitude_west - sidereal_time) / 360.0, 1.0)
}

/// Solar positions around one civil day together with the observer.
///
/// Owned by a single day's computation. The three positions sit one day
/// apart so right ascension and declination can be interpolated at any
/// fraction of the current day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverContext {
    pub observer: Coordinates,
    pub previous: SolarCoordinates,
    pub current: SolarCoordinates,
    pub next: SolarCoordinates,
    /// Approximate transit m0, as a fraction of the day
    pub approximate_transit: f64,
}

impl SolverContext {
    pub fn new(
        observer: Coordinates,
        previous: SolarCoordinates,
        current: SolarCoordinates,
        next: SolarCoordinates,
    ) -> Self {
        let approximate_transit = approximate_transit(
            observer.longitude,
            current.apparent_sidereal_time,
            current.right_ascension,
        );
        Self {
            observer,
            previous,
            current,
            next,
            approximate_transit,
        }
    }

    /// Builds the context from the Sun's positions at 0h UT on the day
    /// before, on, and after `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if `observer` lies outside the valid coordinate ranges.
    pub fn for_date(observer: Coordinates, date: NaiveDate) -> Result<Self, CalculationError> {
        observer.validate()?;
        let julian_day = julian_day_from_date(date);
        Ok(Self::new(
            observer,
            SolarCoordinates::new(julian_day - 1.0),
            SolarCoordinates::new(julian_day),
            SolarCoordinates::new(julian_day + 1.0),
        ))
    }

    /// Solar transit in UT hours after one refinement of the approximate transit.
    pub fn corrected_transit(&self) -> f64 {
        let m0 = self.approximate_transit;
        let longitude_west = -self.observer.longitude;
        let theta = unwind_angle(self.current.apparent_sidereal_time + SIDEREAL_DEGREES_PER_DAY * m0);
        let alpha = unwind_angle(self.interpolated_right_ascension(m0));
        let local_hour_angle = closest_angle(theta - longitude_west - alpha);
        (m0 - local_hour_angle / 360.0) * 24.0
    }

    /// Time at which the Sun reaches `altitude` on the chosen side of transit.
    ///
    /// Returns `None` when the Sun never reaches the altitude that day.
    pub(crate) fn solve_hour_angle(&self, altitude: f64, after_transit: bool) -> Option<f64> {
        let m0 = self.approximate_transit;
        let latitude = self.observer.latitude;
        let longitude_west = -self.observer.longitude;
        let phi = latitude.to_radians();
        let delta = self.current.declination.to_radians();

        let numerator = altitude.to_radians().sin() - phi.sin() * delta.sin();
        let denominator = phi.cos() * delta.cos();
        if denominator.abs() < DEGENERATE_EPSILON {
            return None;
        }
        let ratio = numerator / denominator;
        if ratio.abs() > 1.0 {
            return None;
        }

        let h0 = safe_acos(ratio).to_degrees();
        let m = if after_transit { m0 + h0 / 360.0 } else { m0 - h0 / 360.0 };

        let theta = unwind_angle(self.current.apparent_sidereal_time + SIDEREAL_DEGREES_PER_DAY * m);
        let alpha = unwind_angle(self.interpolated_right_ascension(m));
        let declination = interpolate_value(
            self.current.declination,
            self.previous.declination,
            self.next.declination,
            m,
        );
        // Not wrapped: only its trig functions are used below.
        let local_hour_angle = theta - longitude_west - alpha;
        let reached = altitude_of_celestial_body(latitude, declination, local_hour_angle);

        let slope = 360.0 * declination.to_radians().cos() * phi.cos() * local_hour_angle.to_radians().sin();
        let correction = if slope.abs() > DEGENERATE_EPSILON {
            ((reached - altitude) / slope).clamp(-MAX_CORRECTION_DAYS, MAX_CORRECTION_DAYS)
        } else {
            0.0
        };

        Some((m + correction) * 24.0)
    }

    /// Stand-in reported when [`Self::solve_hour_angle`] has no solution.
    fn unsolved_hour_angle(&self, after_transit: bool) -> f64 {
        let offset = if after_transit {
            NO_SOLUTION_OFFSET_DAYS
        } else {
            -NO_SOLUTION_OFFSET_DAYS
        };
        (self.approximate_transit + offset) * 24.0
    }

    fn interpolated_right_ascension(&self, factor: f64) -> f64 {
        interpolate_angles(
            self.current.right_ascension,
            self.previous.right_ascension,
            self.next.right_ascension,
            factor,
        )
    }
}

/// Time in UT hours at which the Sun reaches `angle` degrees of altitude.
///
/// Negative angles describe depressions below the horizon (e.g. `-18.0` for
/// astronomical twilight). If the Sun never reaches the altitude that day the
/// result is six hours before or after the approximate transit.
///
/// # Arguments
/// * `context` - The day's solver context
/// * `angle` - Target altitude in degrees
/// * `after_transit` - `true` for the evening side, `false` for the morning side
pub fn hour_angle(context: &SolverContext, angle: f64, after_transit: bool) -> f64 {
    context
        .solve_hour_angle(angle, after_transit)
        .unwrap_or_else(|| context.unsolved_hour_angle(after_transit))
}

/// Altitude at which an object's shadow equals its noon shadow plus
/// `shadow_length` times its height.
pub(crate) fn afternoon_altitude(context: &SolverContext, shadow_length: ShadowLength) -> f64 {
    let tangent = (context.observer.latitude - context.current.declination).abs();
    let inverse = shadow_length.multiplier() + safe_tan(tangent.to_radians());
    safe_atan(1.0 / inverse).to_degrees()
}

/// Time of the afternoon (Asr) shadow event in UT hours.
pub fn afternoon(context: &SolverContext, shadow_length: ShadowLength) -> f64 {
    hour_angle(context, afternoon_altitude(context, shadow_length), true)
}

/// Transit, sunrise and sunset for one day in UT hours.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DayEventTimes {
    pub transit: f64,
    pub sunrise: f64,
    pub sunset: f64,
}

impl DayEventTimes {
    pub fn from_context(context: &SolverContext) -> Self {
        Self {
            transit: context.corrected_transit(),
            sunrise: hour_angle(context, STANDARD_SUN_ALTITUDE, false),
            sunset: hour_angle(context, STANDARD_SUN_ALTITUDE, true),
        }
    }
}

/// Solves transit, sunrise and sunset at `coordinates` for the UT civil day `date`.
///
/// # Errors
///
/// Returns [`CalculationError::LatitudeOutOfRange`] or
/// [`CalculationError::LongitudeOutOfRange`] for invalid coordinates.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use prayer_times_calculator::{solve_day_events, Coordinates};
///
/// let raleigh = Coordinates::new(35.0 + 47.0 / 60.0, -78.0 - 39.0 / 60.0);
/// let date = NaiveDate::from_ymd_opt(2015, 7, 12).unwrap();
/// let events = solve_day_events(raleigh, date).unwrap();
///
/// // Solar noon in Raleigh is a little after 17:20 UT in July.
/// assert!((events.transit - 17.34).abs() < 0.05);
/// assert!(events.sunrise < events.transit && events.transit < events.sunset);
/// ```
pub fn solve_day_events(coordinates: Coordinates, date: NaiveDate) -> Result<DayEventTimes, CalculationError> {
    SolverContext::for_date(coordinates, date).map(|context| DayEventTimes::from_context(&context))
}
