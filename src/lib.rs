//! # Prayer Times Calculator
//!
//! Computes the daily Islamic prayer times (Fajr, Sunrise, Dhuhr, Asr,
//! Maghrib, Isha and Midnight) for any location and date from a
//! low-precision model of the Sun's position.
//!
//! The crate is layered bottom-up:
//!
//! - guarded trigonometry and angle helpers ([`unwind_angle`], [`safe_acos`], ...)
//! - the solar position model ([`SolarCoordinates`])
//! - the event-time solver ([`solve_day_events`], [`hour_angle`])
//! - the daily assembler with high-latitude fallbacks ([`compute_prayer_times`])
//!
//! All computations are pure and work without `std`.
//!
//! ## Basic Usage
//!
//! ```
//! use chrono::{NaiveDate, Timelike};
//! use prayer_times_calculator::{compute_prayer_times, CalculationMethod, Coordinates, Madhab, Prayer};
//!
//! // Raleigh, North Carolina
//! let coordinates = Coordinates::new(35.7750, -78.6336);
//! let date = NaiveDate::from_ymd_opt(2015, 7, 12).unwrap();
//!
//! let mut params = CalculationMethod::NorthAmerica.parameters();
//! params.madhab = Madhab::Hanafi;
//!
//! let times = compute_prayer_times(coordinates, date, &params).unwrap();
//!
//! // Times are UTC instants; 04:42 EDT is 08:42 UTC.
//! assert_eq!((times.fajr.hour(), times.fajr.minute()), (8, 42));
//! assert!(times.fajr < times.sunrise && times.isha < times.midnight);
//!
//! // Which event is in effect at Dhuhr?
//! assert_eq!(times.current_prayer(times.dhuhr), Some(Prayer::Dhuhr));
//! assert_eq!(times.next_prayer(times.dhuhr), Some(Prayer::Asr));
//! ```
//!
//! ## Lower-level solutions
//!
//! ```
//! use chrono::NaiveDate;
//! use prayer_times_calculator::{hour_angle, SolverContext, Coordinates};
//!
//! let coordinates = Coordinates::new(35.0 + 47.0 / 60.0, -78.0 - 39.0 / 60.0);
//! let date = NaiveDate::from_ymd_opt(2015, 7, 12).unwrap();
//! let context = SolverContext::for_date(coordinates, date).unwrap();
//!
//! // End of civil twilight, in UT hours (past 24 means the next UT day).
//! let dusk = hour_angle(&context, -6.0, true);
//! assert!(dusk > 25.0 && dusk < 25.1);
//! ```
#![cfg_attr(not(test), no_std)]

pub mod geo;
pub mod high_latitude;
pub mod math;
pub mod params;
pub mod prayer;
pub mod solver;
pub mod time;
pub mod types;


pub use geo::SolarCoordinates;
pub use math::{closest_angle, interpolate_angles, interpolate_value, safe_acos, safe_asin, safe_atan, safe_atan2, safe_tan, unwind_angle};
pub use params::{CalculationMethod, CalculationParameters, HighLatitudeRule, Madhab, NightPortions, PrayerAdjustments, ShadowLength};
pub use prayer::{compute_prayer_times, PrayerTimes};
pub use solver::{afternoon, approximate_transit, hour_angle, solve_day_events, DayEventTimes, SolverContext, STANDARD_SUN_ALTITUDE};
pub use types::{CalculationError, Coordinates, Prayer};
