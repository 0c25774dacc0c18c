#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::{
    math::{polynomial, safe_asin, safe_atan2, unwind_angle},
    time::{julian_century, J2000_EPOCH_JD},
};

// ============================================================================
// Constants
// ============================================================================

/// Conversion factor from arcseconds to degrees
const ARCSECONDS_TO_DEGREES: f64 = 1.0 / 3600.0;

/// Mean rate of increase of Greenwich sidereal time (degrees per day)
const SIDEREAL_TIME_RATE: f64 = 360.98564736629;

/// Base Greenwich mean sidereal time at J2000.0 epoch (degrees)
const GREENWICH_MEAN_SIDEREAL_TIME_BASE: f64 = 280.46061837;

/// Low-precision longitude of the Moon's ascending node, used by the
/// aberration and obliquity corrections (degrees, degrees per century)
const NODE_LONGITUDE_BASE: f64 = 125.04;
const NODE_LONGITUDE_RATE: f64 = 1934.136;

// ============================================================================
// Solar Position Calculations
// ============================================================================

/// Geometric mean longitude of the Sun, referred to the mean equinox of the date.
///
/// # Arguments
/// * `julian_century` - Julian centuries since J2000.0
///
/// # Returns
/// Mean longitude L0 in degrees (0° to 360°)
pub fn mean_solar_longitude(julian_century: f64) -> f64 {
    unwind_angle(polynomial(&[280.466_456_7, 36_000.769_83, 0.000_303_2], julian_century))
}

/// Mean anomaly of the Sun.
///
/// # Returns
/// Mean anomaly M in degrees (0° to 360°)
pub fn mean_solar_anomaly(julian_century: f64) -> f64 {
    unwind_angle(polynomial(&[357.529_11, 35_999.050_29, -0.000_153_7], julian_century))
}

/// Sun's equation of the center, the correction from mean to true anomaly.
///
/// # Arguments
/// * `julian_century` - Julian centuries since J2000.0
/// * `mean_anomaly` - Mean anomaly of the Sun in degrees
///
/// # Returns
/// Equation of the center C in degrees
pub fn solar_equation_of_the_center(julian_century: f64, mean_anomaly: f64) -> f64 {
    let m = mean_anomaly.to_radians();
    let first = polynomial(&[1.914_602, -0.004_817, -0.000_014], julian_century) * m.sin();
    let second = polynomial(&[0.019_993, -0.000_101], julian_century) * (2.0 * m).sin();
    let third = 0.000_289 * (3.0 * m).sin();
    first + second + third
}

/// Apparent longitude of the Sun, corrected for nutation and aberration.
///
/// # Arguments
/// * `julian_century` - Julian centuries since J2000.0
/// * `mean_longitude` - Mean solar longitude L0 in degrees
///
/// # Returns
/// Apparent longitude λ in degrees (0° to 360°)
pub fn apparent_solar_longitude(julian_century: f64, mean_longitude: f64) -> f64 {
    let true_longitude = mean_longitude + solar_equation_of_the_center(julian_century, mean_solar_anomaly(julian_century));
    let omega = NODE_LONGITUDE_BASE - NODE_LONGITUDE_RATE * julian_century;
    unwind_angle(true_longitude - 0.005_69 - 0.004_78 * omega.to_radians().sin())
}

// ============================================================================
// Lunar Orbital Parameters
// ============================================================================

/// Mean longitude of the Moon.
///
/// # Returns
/// Mean lunar longitude L' in degrees (0° to 360°)
pub fn mean_lunar_longitude(julian_century: f64) -> f64 {
    unwind_angle(polynomial(&[218.316_5, 481_267.881_3], julian_century))
}

/// Longitude of the ascending node of the Moon's mean orbit on the ecliptic.
///
/// # Returns
/// Ω in degrees (0° to 360°)
pub fn ascending_lunar_node_longitude(julian_century: f64) -> f64 {
    unwind_angle(polynomial(
        &[125.044_52, -1_934.136_261, 0.002_070_8, 1.0 / 450_000.0],
        julian_century,
    ))
}

// ============================================================================
// Ecliptic and Nutation
// ============================================================================

/// Mean obliquity of the ecliptic.
///
/// # Returns
/// ε0 in degrees
pub fn mean_obliquity_of_the_ecliptic(julian_century: f64) -> f64 {
    polynomial(
        &[23.439_291, -0.013_004_167, -0.000_000_163_9, 0.000_000_503_6],
        julian_century,
    )
}

/// Apparent obliquity of the ecliptic, used for the apparent position of the Sun.
///
/// # Arguments
/// * `julian_century` - Julian centuries since J2000.0
/// * `mean_obliquity` - Mean obliquity ε0 in degrees
pub fn apparent_obliquity_of_the_ecliptic(julian_century: f64, mean_obliquity: f64) -> f64 {
    let omega = NODE_LONGITUDE_BASE - NODE_LONGITUDE_RATE * julian_century;
    mean_obliquity + 0.002_56 * omega.to_radians().cos()
}

/// Nutation in longitude (Δψ) from the four dominant periodic terms.
///
/// # Arguments
/// * `solar_longitude` - Mean solar longitude L0 in degrees
/// * `lunar_longitude` - Mean lunar longitude L' in degrees
/// * `ascending_node` - Longitude of the lunar ascending node Ω in degrees
///
/// # Returns
/// Δψ in degrees
pub fn nutation_in_longitude(solar_longitude: f64, lunar_longitude: f64, ascending_node: f64) -> f64 {
    let l0 = solar_longitude.to_radians();
    let lp = lunar_longitude.to_radians();
    let omega = ascending_node.to_radians();
    (-17.2 * omega.sin() - 1.32 * (2.0 * l0).sin() - 0.23 * (2.0 * lp).sin() + 0.21 * (2.0 * omega).sin())
        * ARCSECONDS_TO_DEGREES
}

/// Nutation in obliquity (Δε) from the four dominant periodic terms.
///
/// # Returns
/// Δε in degrees
pub fn nutation_in_obliquity(solar_longitude: f64, lunar_longitude: f64, ascending_node: f64) -> f64 {
    let l0 = solar_longitude.to_radians();
    let lp = lunar_longitude.to_radians();
    let omega = ascending_node.to_radians();
    (9.2 * omega.cos() + 0.57 * (2.0 * l0).cos() + 0.10 * (2.0 * lp).cos() - 0.09 * (2.0 * omega).cos())
        * ARCSECONDS_TO_DEGREES
}

// ============================================================================
// Sidereal Time and Horizontal Coordinates
// ============================================================================

/// Mean sidereal time at Greenwich.
///
/// # Arguments
/// * `julian_century` - Julian centuries since J2000.0
///
/// # Returns
/// θ0 in degrees (0° to 360°)
pub fn mean_sidereal_time(julian_century: f64) -> f64 {
    let julian_day = julian_century * 36_525.0 + J2000_EPOCH_JD;
    let theta = GREENWICH_MEAN_SIDEREAL_TIME_BASE
        + SIDEREAL_TIME_RATE * (julian_day - J2000_EPOCH_JD)
        + 0.000_387_933 * julian_century.powi(2)
        - julian_century.powi(3) / 38_710_000.0;
    unwind_angle(theta)
}

/// Altitude of a body above the horizon.
///
/// # Arguments
/// * `latitude` - Observer latitude φ in degrees
/// * `declination` - Declination δ of the body in degrees
/// * `local_hour_angle` - Local hour angle H in degrees
///
/// # Returns
/// Altitude h in degrees
pub fn altitude_of_celestial_body(latitude: f64, declination: f64, local_hour_angle: f64) -> f64 {
    let phi = latitude.to_radians();
    let delta = declination.to_radians();
    let hour_angle = local_hour_angle.to_radians();
    safe_asin(phi.sin() * delta.sin() + phi.cos() * delta.cos() * hour_angle.cos()).to_degrees()
}

/// Equatorial position of the Sun at one Julian day.
///
/// Every field is in degrees. A value is computed once per day and never
/// mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolarCoordinates {
    /// Declination δ
    pub declination: f64,
    /// Right ascension α, wrapped to [0, 360)
    pub right_ascension: f64,
    /// Apparent sidereal time at Greenwich
    pub apparent_sidereal_time: f64,
}

impl SolarCoordinates {
    /// Evaluates the solar model at `julian_day`.
    ///
    /// Pure and infallible: any finite Julian day gives finite coordinates.
    pub fn new(julian_day: f64) -> Self {
        let t = julian_century(julian_day);
        let l0 = mean_solar_longitude(t);
        let lp = mean_lunar_longitude(t);
        let omega = ascending_lunar_node_longitude(t);
        let lambda = apparent_solar_longitude(t, l0).to_radians();

        let theta0 = mean_sidereal_time(t);
        let delta_psi = nutation_in_longitude(l0, lp, omega);
        let delta_epsilon = nutation_in_obliquity(l0, lp, omega);

        let epsilon0 = mean_obliquity_of_the_ecliptic(t);
        let epsilon_apparent = apparent_obliquity_of_the_ecliptic(t, epsilon0).to_radians();

        let declination = safe_asin(epsilon_apparent.sin() * lambda.sin()).to_degrees();
        let right_ascension =
            unwind_angle(safe_atan2(epsilon_apparent.cos() * lambda.sin(), lambda.cos()).to_degrees());

        // Equation of the equinoxes, Δψ·cos ε
        let apparent_sidereal_time = theta0 + delta_psi * (epsilon0 + delta_epsilon).to_radians().cos();

        Self {
            declination,
            right_ascension,
            apparent_sidereal_time,
        }
    }
}
