#[allow(unused_imports)]
use core_maths::CoreFloat;

use core::f64::consts::{FRAC_PI_2, PI};

/// Magnitude returned by [`safe_tan`] in place of an infinite tangent.
const TAN_SENTINEL: f64 = 1e10;

/// Distance from an odd multiple of π/2 treated as the asymptote itself.
const TAN_POLE_EPSILON: f64 = 1e-10;

/// Arguments of [`safe_atan`] beyond this magnitude are pinned to the asymptote.
const ATAN_LIMIT: f64 = 1e10;

/// Inset applied to ±π/2 when [`safe_atan`] pins a result.
const ATAN_INSET: f64 = 1e-10;

/// Both components of [`safe_atan2`] below this magnitude mean "no direction".
const ATAN2_ZERO: f64 = 1e-15;

/// Normalizes `value` into the half-open range `[0, max)`.
///
/// Works for any sign of `value`; `max` must be positive.
///
/// # Arguments
///
/// * `value` - The value to wrap
/// * `max` - The exclusive upper bound of the range
///
/// # Returns
///
/// `value - max * floor(value / max)`
pub(crate) fn normalize_with_bound(value: f64, max: f64) -> f64 {
    value - max * (value / max).floor()
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn unwind_angle(degrees: f64) -> f64 {
    normalize_with_bound(degrees, 360.0)
}

/// Maps an angle in degrees onto `[-180, 180]` by removing the nearest
/// multiple of 360.
///
/// Angles already inside the interval are returned untouched, which makes the
/// interval a fixed point of the function.
pub fn closest_angle(degrees: f64) -> f64 {
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    degrees - 360.0 * (degrees / 360.0).round()
}

/// Arcsine with the argument clamped to `[-1, 1]`.
pub fn safe_asin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

/// Arccosine with the argument clamped to `[-1, 1]`.
pub fn safe_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// Tangent that returns `±1e10` instead of an infinity near odd multiples of π/2.
///
/// The sign of the sentinel follows the sign of `x` reduced modulo π.
pub fn safe_tan(x: f64) -> f64 {
    let reduced = x % PI;
    if (reduced - FRAC_PI_2).abs() < TAN_POLE_EPSILON || (reduced + FRAC_PI_2).abs() < TAN_POLE_EPSILON {
        return if reduced > 0.0 { TAN_SENTINEL } else { -TAN_SENTINEL };
    }
    x.tan()
}

/// Arctangent that pins huge arguments just inside ±π/2.
pub fn safe_atan(x: f64) -> f64 {
    if x > ATAN_LIMIT {
        FRAC_PI_2 - ATAN_INSET
    } else if x < -ATAN_LIMIT {
        -FRAC_PI_2 + ATAN_INSET
    } else {
        x.atan()
    }
}

/// Two-argument arctangent returning `0` when both components are
/// effectively zero.
pub fn safe_atan2(y: f64, x: f64) -> f64 {
    if x.abs() < ATAN2_ZERO && y.abs() < ATAN2_ZERO {
        return 0.0;
    }
    y.atan2(x)
}

/// Evaluates a polynomial in `x` with Horner's method.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

// ============================================================================
// Three-Point Interpolation
// ============================================================================

/// Interpolates across three equally spaced samples.
///
/// Fits a quadratic through `previous`, `value` and `next` (one day apart)
/// and evaluates it at `factor` days after `value`. A factor of zero
/// returns `value` exactly.
///
/// # Arguments
///
/// * `value` - Sample at the anchor (the current day)
/// * `previous` - Sample one step before the anchor
/// * `next` - Sample one step after the anchor
/// * `factor` - Offset from the anchor, in steps
pub fn interpolate_value(value: f64, previous: f64, next: f64, factor: f64) -> f64 {
    let a = value - previous;
    let b = next - value;
    let c = b - a;
    value + (factor / 2.0) * (a + b + factor * c)
}

/// Same as [`interpolate_value`] for angles in degrees.
///
/// Both first differences are unwound first, so a right ascension that
/// crosses 360° → 0° between samples follows the short arc.
pub fn interpolate_angles(value: f64, previous: f64, next: f64, factor: f64) -> f64 {
    let a = unwind_angle(value - previous);
    let b = unwind_angle(next - value);
    let c = b - a;
    value + (factor / 2.0) * (a + b + factor * c)
}
