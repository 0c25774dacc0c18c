use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observer location in degrees.
///
/// Latitude is positive north of the equator and must lie in `[-90, 90]`;
/// longitude is positive east of Greenwich and must lie in `[-180, 180]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Checks both components against their valid ranges.
    ///
    /// # Errors
    ///
    /// [`CalculationError::LatitudeOutOfRange`] or
    /// [`CalculationError::LongitudeOutOfRange`]; NaN fails both checks.
    pub fn validate(&self) -> Result<(), CalculationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CalculationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CalculationError::LongitudeOutOfRange);
        }
        Ok(())
    }
}

/// The seven daily events, in chronological order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Midnight,
}

impl Prayer {
    /// All events from Fajr to Midnight.
    pub const ALL: [Prayer; 7] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Midnight,
    ];

    /// The event that follows this one on the same day, if any.
    pub fn next(self) -> Option<Prayer> {
        match self {
            Prayer::Fajr => Some(Prayer::Sunrise),
            Prayer::Sunrise => Some(Prayer::Dhuhr),
            Prayer::Dhuhr => Some(Prayer::Asr),
            Prayer::Asr => Some(Prayer::Maghrib),
            Prayer::Maghrib => Some(Prayer::Isha),
            Prayer::Isha => Some(Prayer::Midnight),
            Prayer::Midnight => None,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Latitude out of range")]
    LatitudeOutOfRange,

    #[error("Longitude out of range")]
    LongitudeOutOfRange,

    #[error("Invalid calculation parameters")]
    InvalidParameters,

    #[error("Could not resolve {0:?} for this day")]
    IncompleteDay(Prayer),

    #[error("Time conversion error")]
    TimeConversionError,
}
