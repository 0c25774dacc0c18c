use chrono::{DateTime, Days, TimeDelta, Timelike, Utc};
use chrono_tz::{America::New_York, Europe::Oslo, Tz};

use super::date;
use crate::params::{CalculationMethod, CalculationParameters, HighLatitudeRule, Madhab, NightPortions, PrayerAdjustments};
use crate::prayer::{compute_prayer_times, PrayerTimes};
use crate::types::{CalculationError, Coordinates, Prayer};

fn local(time: DateTime<Utc>, zone: Tz) -> (u32, u32) {
    let local = time.with_timezone(&zone);
    (local.hour(), local.minute())
}

fn raleigh() -> Coordinates {
    Coordinates::new(35.7750, -78.6336)
}

fn seconds(n: i64) -> TimeDelta {
    TimeDelta::try_seconds(n).unwrap()
}

#[test]
fn raleigh_summer_times_with_hanafi_asr() {
    let mut params = CalculationMethod::NorthAmerica.parameters();
    params.madhab = Madhab::Hanafi;
    let day = date(2015, 7, 12);
    let times = compute_prayer_times(raleigh(), day, &params).unwrap();

    assert_eq!(local(times.fajr, New_York), (4, 42));
    assert_eq!(local(times.sunrise, New_York), (6, 8));
    assert_eq!(local(times.dhuhr, New_York), (13, 21));
    assert_eq!(local(times.asr, New_York), (18, 22));
    assert_eq!(local(times.maghrib, New_York), (20, 32));
    assert_eq!(local(times.isha, New_York), (21, 57));
    assert_eq!(local(times.midnight, New_York), (0, 37));

    let tomorrow = compute_prayer_times(raleigh(), day.checked_add_days(Days::new(1)).unwrap(), &params).unwrap();
    assert!(times.midnight > times.maghrib);
    assert!(times.midnight < tomorrow.sunrise);
}

#[test]
fn adjustments_shift_each_time_by_their_minutes() {
    let day = date(2015, 12, 1);
    let mut params = CalculationMethod::MuslimWorldLeague.parameters();
    let preset = compute_prayer_times(raleigh(), day, &params).unwrap();

    assert_eq!(local(preset.fajr, New_York), (5, 35));
    assert_eq!(local(preset.sunrise, New_York), (7, 6));
    assert_eq!(local(preset.dhuhr, New_York), (12, 5));
    assert_eq!(local(preset.asr, New_York), (14, 42));
    assert_eq!(local(preset.maghrib, New_York), (17, 1));
    assert_eq!(local(preset.isha, New_York), (18, 26));

    params.adjustments = PrayerAdjustments {
        fajr: 10,
        sunrise: 10,
        dhuhr: 10,
        asr: 10,
        maghrib: 10,
        isha: 10,
        midnight: 0,
    };
    let shifted = compute_prayer_times(raleigh(), day, &params).unwrap();
    assert_eq!(local(shifted.fajr, New_York), (5, 45));
    assert_eq!(local(shifted.sunrise, New_York), (7, 16));
    assert_eq!(local(shifted.dhuhr, New_York), (12, 14));
    assert_eq!(local(shifted.asr, New_York), (14, 52));
    assert_eq!(local(shifted.maghrib, New_York), (17, 11));
    assert_eq!(local(shifted.isha, New_York), (18, 36));

    params.adjustments = PrayerAdjustments::default();
    let plain = compute_prayer_times(raleigh(), day, &params).unwrap();
    assert_eq!(local(plain.fajr, New_York), (5, 35));
    assert_eq!(local(plain.sunrise, New_York), (7, 6));
    assert_eq!(local(plain.dhuhr, New_York), (12, 4));
    assert_eq!(local(plain.asr, New_York), (14, 42));
    assert_eq!(local(plain.maghrib, New_York), (17, 1));
    assert_eq!(local(plain.isha, New_York), (18, 26));
    assert_eq!(local(plain.midnight, New_York), (23, 18));

    let tomorrow = compute_prayer_times(raleigh(), date(2015, 12, 2), &params).unwrap();
    assert!(plain.midnight > plain.maghrib);
    assert!(plain.midnight < tomorrow.sunrise);
}

#[test]
fn moonsighting_committee_at_mid_latitude() {
    let params = CalculationMethod::MoonsightingCommittee.parameters();
    let times = compute_prayer_times(raleigh(), date(2016, 1, 31), &params).unwrap();

    assert_eq!(local(times.fajr, New_York), (5, 48));
    assert_eq!(local(times.sunrise, New_York), (7, 16));
    assert_eq!(local(times.dhuhr, New_York), (12, 33));
    assert_eq!(local(times.asr, New_York), (15, 20));
    assert_eq!(local(times.maghrib, New_York), (17, 43));
    assert_eq!(local(times.isha, New_York), (19, 4));
}

#[test]
fn moonsighting_committee_above_55_degrees_uses_fixed_and_seasonal_times() {
    let mut params = CalculationMethod::MoonsightingCommittee.parameters();
    params.madhab = Madhab::Hanafi;
    let oslo = Coordinates::new(59.9094, 10.7349);
    let times = compute_prayer_times(oslo, date(2016, 1, 1), &params).unwrap();

    assert_eq!(local(times.fajr, Oslo), (7, 49));
    assert_eq!(local(times.sunrise, Oslo), (9, 19));
    assert_eq!(local(times.dhuhr, Oslo), (12, 25));
    assert_eq!(local(times.asr, Oslo), (13, 36));
    assert_eq!(local(times.maghrib, Oslo), (15, 25));
    assert_eq!(local(times.isha, Oslo), (17, 1));

    // Fajr is the fixed 90 minutes before sunrise.
    assert_eq!(times.sunrise - times.fajr, TimeDelta::try_minutes(90).unwrap());
    // Isha is the seasonal evening value: sunset (Maghrib without its
    // 3 minute offset) plus 5987 seconds.
    let sunset = times.maghrib - TimeDelta::try_minutes(3).unwrap();
    assert_eq!(times.isha - sunset, seconds(5987));
    assert!(times.isha < times.midnight);
}

#[test]
fn fixed_interval_isha_follows_maghrib() {
    for method in [CalculationMethod::UmmAlQura, CalculationMethod::Gulf, CalculationMethod::Qatar] {
        let params = method.parameters();
        let times = compute_prayer_times(Coordinates::new(21.4225, 39.8262), date(2024, 3, 10), &params).unwrap();
        assert_eq!(times.isha - times.maghrib, TimeDelta::try_minutes(90).unwrap(), "{}", method.name());
    }
}

#[test]
fn night_portion_bounds_isha_at_high_latitude_in_summer() {
    // Twilight never ends in Oslo around the solstice, so Isha has no
    // geometric solution and falls back to a share of the night.
    let oslo = Coordinates::new(59.9094, 10.7349);
    let day = date(2016, 6, 21);

    for rule in [
        HighLatitudeRule::MiddleOfTheNight,
        HighLatitudeRule::SeventhOfTheNight,
        HighLatitudeRule::TwilightAngle,
    ] {
        let mut params = CalculationMethod::MuslimWorldLeague.parameters();
        params.high_latitude_rule = rule;
        let times = compute_prayer_times(oslo, day, &params).unwrap();

        let next_sunrise = times.sunrise + TimeDelta::try_days(1).unwrap();
        let night = (next_sunrise - times.maghrib).num_seconds();
        let portions = params.night_portions();

        let expected_isha = times.maghrib + seconds((portions.isha * night as f64) as i64);
        assert_eq!(times.isha, expected_isha, "{rule:?}");

        let expected_fajr = times.sunrise - seconds((portions.fajr * night as f64) as i64);
        assert_eq!(times.fajr, expected_fajr, "{rule:?}");
        assert!(times.fajr < times.sunrise);
    }
}

#[test]
fn middle_of_the_night_isha_can_follow_midnight_near_the_summer_solstice() {
    // Half of the short night after sunset lands past the midpoint between
    // Maghrib and an early next-day Fajr.
    let mut params = CalculationMethod::MuslimWorldLeague.parameters();
    params.high_latitude_rule = HighLatitudeRule::MiddleOfTheNight;
    let oslo = Coordinates::new(59.9094, 10.7349);
    let day = date(2016, 6, 21);

    let times = compute_prayer_times(oslo, day, &params).unwrap();
    let tomorrow = compute_prayer_times(oslo, day.checked_add_days(Days::new(1)).unwrap(), &params).unwrap();

    let half_night = seconds((tomorrow.fajr - times.maghrib).num_seconds() / 2);
    assert_eq!(times.midnight, times.maghrib + half_night);
    assert!(times.midnight < times.isha, "{times:?}");
    assert!(times.isha < tomorrow.sunrise);
}

#[test]
fn night_portions_follow_the_rule() {
    let mut params = CalculationParameters {
        fajr_angle: 10.0,
        isha_angle: 15.0,
        ..CalculationParameters::default()
    };

    params.high_latitude_rule = HighLatitudeRule::MiddleOfTheNight;
    assert_eq!(params.night_portions(), NightPortions { fajr: 0.5, isha: 0.5 });

    params.high_latitude_rule = HighLatitudeRule::SeventhOfTheNight;
    assert_eq!(
        params.night_portions(),
        NightPortions {
            fajr: 1.0 / 7.0,
            isha: 1.0 / 7.0
        }
    );

    params.high_latitude_rule = HighLatitudeRule::TwilightAngle;
    assert_eq!(
        params.night_portions(),
        NightPortions {
            fajr: 10.0 / 60.0,
            isha: 15.0 / 60.0
        }
    );
}

#[test]
fn presets_resolve_every_field() {
    let mwl = CalculationMethod::MuslimWorldLeague.parameters();
    assert_eq!((mwl.fajr_angle, mwl.isha_angle, mwl.isha_interval), (18.0, 17.0, 0));
    assert_eq!(mwl.adjustments.dhuhr, 1);
    assert_eq!(mwl.madhab, Madhab::Shafi);
    assert_eq!(mwl.high_latitude_rule, HighLatitudeRule::TwilightAngle);

    let msc = CalculationMethod::MoonsightingCommittee.parameters();
    assert_eq!((msc.adjustments.dhuhr, msc.adjustments.maghrib), (5, 3));

    let umm_al_qura = CalculationMethod::UmmAlQura.parameters();
    assert_eq!((umm_al_qura.fajr_angle, umm_al_qura.isha_interval), (18.5, 90));
    assert_eq!(umm_al_qura.adjustments, PrayerAdjustments::default());

    for method in CalculationMethod::ALL {
        assert_eq!(method.parameters().method, method);
        assert!(!method.name().is_empty());
    }
}

fn karachi_times() -> PrayerTimes {
    let mut params = CalculationMethod::Karachi.parameters();
    params.madhab = Madhab::Hanafi;
    params.high_latitude_rule = HighLatitudeRule::TwilightAngle;
    compute_prayer_times(Coordinates::new(33.720817, 73.090032), date(2015, 9, 1), &params).unwrap()
}

#[test]
fn current_prayer_is_the_latest_started_event() {
    let times = karachi_times();
    assert_eq!(times.current_prayer(times.fajr - seconds(1)), None);
    assert_eq!(times.current_prayer(times.fajr), Some(Prayer::Fajr));
    assert_eq!(times.current_prayer(times.fajr + seconds(1)), Some(Prayer::Fajr));
    assert_eq!(times.current_prayer(times.sunrise + seconds(1)), Some(Prayer::Sunrise));
    assert_eq!(times.current_prayer(times.dhuhr + seconds(1)), Some(Prayer::Dhuhr));
    assert_eq!(times.current_prayer(times.asr + seconds(1)), Some(Prayer::Asr));
    assert_eq!(times.current_prayer(times.maghrib + seconds(1)), Some(Prayer::Maghrib));
    assert_eq!(times.current_prayer(times.isha + seconds(1)), Some(Prayer::Isha));
    assert_eq!(times.current_prayer(times.midnight + seconds(1)), Some(Prayer::Midnight));
}

#[test]
fn next_prayer_follows_the_current_one() {
    let times = karachi_times();
    assert_eq!(times.next_prayer(times.fajr - seconds(1)), Some(Prayer::Fajr));
    assert_eq!(times.next_prayer(times.fajr), Some(Prayer::Sunrise));
    assert_eq!(times.next_prayer(times.fajr + seconds(1)), Some(Prayer::Sunrise));
    assert_eq!(times.next_prayer(times.sunrise + seconds(1)), Some(Prayer::Dhuhr));
    assert_eq!(times.next_prayer(times.dhuhr + seconds(1)), Some(Prayer::Asr));
    assert_eq!(times.next_prayer(times.asr + seconds(1)), Some(Prayer::Maghrib));
    assert_eq!(times.next_prayer(times.maghrib + seconds(1)), Some(Prayer::Isha));
    assert_eq!(times.next_prayer(times.isha + seconds(1)), Some(Prayer::Midnight));
    assert_eq!(times.next_prayer(times.midnight + seconds(1)), None);
}

#[test]
fn time_for_prayer_maps_every_event() {
    let times = karachi_times();
    assert_eq!(times.time_for_prayer(Prayer::Fajr), times.fajr);
    assert_eq!(times.time_for_prayer(Prayer::Sunrise), times.sunrise);
    assert_eq!(times.time_for_prayer(Prayer::Dhuhr), times.dhuhr);
    assert_eq!(times.time_for_prayer(Prayer::Asr), times.asr);
    assert_eq!(times.time_for_prayer(Prayer::Maghrib), times.maghrib);
    assert_eq!(times.time_for_prayer(Prayer::Isha), times.isha);
    assert_eq!(times.time_for_prayer(Prayer::Midnight), times.midnight);
}

#[test]
fn new_york_summer_times_are_ordered() {
    let params = CalculationMethod::MuslimWorldLeague.parameters();
    let times = compute_prayer_times(Coordinates::new(40.7128, -74.0060), date(2023, 7, 15), &params).unwrap();

    assert!(times.fajr < times.sunrise);
    assert!(times.sunrise < times.dhuhr);
    assert!(times.dhuhr < times.asr);
    assert!(times.asr < times.maghrib);
    assert!(times.maghrib < times.isha);
    assert!(times.isha <= times.midnight);
}

#[test]
fn cities_around_the_world_resolve_through_the_year() {
    let cities = [
        ("New York", Coordinates::new(40.7128, -74.0060)),
        ("Tokyo", Coordinates::new(35.6762, 139.6503)),
        ("Sydney", Coordinates::new(-33.8688, 151.2093)),
        ("Dubai", Coordinates::new(25.2048, 55.2708)),
        ("Honolulu", Coordinates::new(21.3099, -157.8581)),
    ];
    let days = [date(2023, 1, 15), date(2023, 3, 20), date(2023, 6, 21), date(2023, 9, 23), date(2023, 12, 21)];
    let params = CalculationMethod::MuslimWorldLeague.parameters();

    for (name, coordinates) in cities {
        for day in days {
            let times = compute_prayer_times(coordinates, day, &params)
                .unwrap_or_else(|error| panic!("{name} on {day}: {error}"));
            let ordered = Prayer::ALL
                .windows(2)
                .all(|pair| times.time_for_prayer(pair[0]) <= times.time_for_prayer(pair[1]));
            assert!(ordered, "{name} on {day}: {times:?}");
        }
    }
}

#[test]
fn polar_coordinates_do_not_panic() {
    let params = CalculationMethod::MuslimWorldLeague.parameters();
    for coordinates in [
        Coordinates::new(85.0, 0.0),
        Coordinates::new(90.0, 0.0),
        Coordinates::new(-90.0, 0.0),
    ] {
        let _ = compute_prayer_times(coordinates, date(2023, 7, 15), &params);
    }
}

#[test]
fn invalid_coordinates_are_rejected() {
    let params = CalculationMethod::MuslimWorldLeague.parameters();
    let day = date(2023, 7, 15);

    assert_eq!(
        compute_prayer_times(Coordinates::new(200.0, 300.0), day, &params),
        Err(CalculationError::LatitudeOutOfRange)
    );
    assert_eq!(
        compute_prayer_times(Coordinates::new(40.0, 300.0), day, &params),
        Err(CalculationError::LongitudeOutOfRange)
    );
    assert_eq!(
        compute_prayer_times(Coordinates::new(f64::NAN, 0.0), day, &params),
        Err(CalculationError::LatitudeOutOfRange)
    );
}

#[test]
fn non_finite_angles_are_rejected() {
    let mut params = CalculationMethod::MuslimWorldLeague.parameters();
    params.fajr_angle = f64::NAN;
    assert_eq!(
        compute_prayer_times(raleigh(), date(2023, 7, 15), &params),
        Err(CalculationError::InvalidParameters)
    );
}
