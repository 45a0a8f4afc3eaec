//! Sunrise and sunset times for a day.
//!
//! Astronomical times come from the `sunrise` crate, which works in UTC. The
//! results are converted into the timezone of the instant being evaluated, so
//! a `DateTime<Local>` produces local clock times and a `DateTime<Utc>` produces
//! UTC clock times.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::time::TimeOfDay;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Sunrise and sunset clock times for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTimes {
    pub sunrise: TimeOfDay,
    pub sunset: TimeOfDay,
}

impl SolarTimes {
    pub fn new(sunrise: TimeOfDay, sunset: TimeOfDay) -> Self {
        Self { sunrise, sunset }
    }
}

/// Where a set of solar times came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarSource {
    /// Manual mode, or no location configured
    Manual,
    /// Calculated from the configured location
    Calculated,
    /// Location configured, but the calculation was unusable (invalid
    /// coordinates, or polar day or night) so the manual values were used
    Fallback,
}

impl SolarSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Calculated => "calculated",
            Self::Fallback => "manual fallback",
        }
    }
}

/// Determine the solar times that drive the cycle at `instant`.
///
/// Manual values win when manual mode is on or no location is known. Otherwise
/// sunrise and sunset are calculated for the date of `instant` in its own
/// timezone. Degenerate results (polar day or night, where both events land on
/// the same minute) also fall back to the manual values.
pub fn compute_solar_times<Tz: TimeZone>(
    location: Option<GeoLocation>,
    manual_sunrise: TimeOfDay,
    manual_sunset: TimeOfDay,
    manual_mode_enabled: bool,
    instant: &DateTime<Tz>,
) -> SolarTimes {
    resolve_solar_times(
        location,
        manual_sunrise,
        manual_sunset,
        manual_mode_enabled,
        instant,
    )
    .0
}

/// Like [`compute_solar_times`], also reporting which source was used.
pub fn resolve_solar_times<Tz: TimeZone>(
    location: Option<GeoLocation>,
    manual_sunrise: TimeOfDay,
    manual_sunset: TimeOfDay,
    manual_mode_enabled: bool,
    instant: &DateTime<Tz>,
) -> (SolarTimes, SolarSource) {
    let manual = SolarTimes::new(manual_sunrise, manual_sunset);

    let location = match location {
        Some(location) if !manual_mode_enabled => location,
        _ => return (manual, SolarSource::Manual),
    };

    match calculate_solar_times(location, instant.date_naive(), &instant.timezone()) {
        Some(times) if times.sunrise != times.sunset => (times, SolarSource::Calculated),
        _ => (manual, SolarSource::Fallback),
    }
}

/// Astronomical sunrise/sunset for `date`, expressed as clock times in `tz`.
///
/// Returns `None` for coordinates outside the valid range.
pub fn calculate_solar_times<Tz: TimeZone>(
    location: GeoLocation,
    date: NaiveDate,
    tz: &Tz,
) -> Option<SolarTimes> {
    let coord = Coordinates::new(location.latitude, location.longitude)?;
    let solar_day = SolarDay::new(coord, date);

    let sunrise_utc = solar_day.event_time(SolarEvent::Sunrise);
    let sunset_utc = solar_day.event_time(SolarEvent::Sunset);

    Some(SolarTimes::new(
        TimeOfDay::of(&sunrise_utc.with_timezone(tz)),
        TimeOfDay::of(&sunset_utc.with_timezone(tz)),
    ))
}
