//! Configuration validation functionality.
//!
//! Rejects values outside the ranges the engine can represent and warns about
//! settings that are legal but probably not what the user meant, such as
//! transition windows long enough to overlap.

use anyhow::Result;

use super::Config;
use crate::constants::*;
use crate::time::TimeOfDay;

/// Validate a raw configuration before it is resolved into settings.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_temperature("day_temperature", config.day_temperature)?;
    validate_temperature("night_temperature", config.night_temperature)?;
    validate_brightness("day_brightness", config.day_brightness)?;
    validate_brightness("night_brightness", config.night_brightness)?;

    // Validate geographic coordinates
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        anyhow::bail!("latitude and longitude must be set together");
    }

    let transition_duration_mins = config
        .transition_duration
        .unwrap_or(DEFAULT_TRANSITION_DURATION);
    if !(MINIMUM_TRANSITION_DURATION..=MAXIMUM_TRANSITION_DURATION)
        .contains(&transition_duration_mins)
    {
        anyhow::bail!(
            "transition_duration ({} minutes) must be between {} and {} minutes",
            transition_duration_mins,
            MINIMUM_TRANSITION_DURATION,
            MAXIMUM_TRANSITION_DURATION
        );
    }

    if let Some(offset) = config.transition_offset
        && offset.abs() > MAXIMUM_TRANSITION_OFFSET
    {
        anyhow::bail!(
            "transition_offset ({} minutes) must be between -{} and {} minutes",
            offset,
            MAXIMUM_TRANSITION_OFFSET,
            MAXIMUM_TRANSITION_OFFSET
        );
    }

    let sunrise = parse_time("sunrise", config.sunrise.as_deref().unwrap_or(DEFAULT_SUNRISE))?;
    let sunset = parse_time("sunset", config.sunset.as_deref().unwrap_or(DEFAULT_SUNSET))?;

    if sunrise == sunset {
        anyhow::bail!(
            "Sunset and sunrise cannot be the same time ({}). \
            There must be a distinction between day and night periods.",
            sunset
        );
    }

    warn_on_overlapping_windows(sunrise, sunset, transition_duration_mins);

    let hotkeys = [
        ("toggle_hotkey", &config.toggle_hotkey),
        ("increase_temperature_hotkey", &config.increase_temperature_hotkey),
        ("decrease_temperature_hotkey", &config.decrease_temperature_hotkey),
        ("increase_brightness_hotkey", &config.increase_brightness_hotkey),
        ("decrease_brightness_hotkey", &config.decrease_brightness_hotkey),
        ("reset_offset_hotkey", &config.reset_offset_hotkey),
    ];
    for (name, binding) in hotkeys {
        if let Some(binding) = binding
            && binding.trim().is_empty()
        {
            anyhow::bail!("{} cannot be empty", name);
        }
    }

    if let Some(whitelist) = &config.whitelist
        && whitelist.iter().any(|entry| entry.trim().is_empty())
    {
        anyhow::bail!("whitelist entries cannot be empty");
    }

    if config.whitelist_enabled == Some(true) && config.whitelist.is_none() {
        log_warning!("whitelist_enabled is set but no whitelist is configured");
    }

    Ok(())
}

fn validate_temperature(name: &str, value: Option<f64>) -> Result<()> {
    if let Some(temp) = value
        && !(MINIMUM_TEMPERATURE..=MAXIMUM_TEMPERATURE).contains(&temp)
    {
        anyhow::bail!(
            "{} ({}) must be between {} and {} Kelvin",
            name,
            temp,
            MINIMUM_TEMPERATURE,
            MAXIMUM_TEMPERATURE
        );
    }
    Ok(())
}

fn validate_brightness(name: &str, value: Option<f64>) -> Result<()> {
    if let Some(brightness) = value
        && !(MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&brightness)
    {
        anyhow::bail!(
            "{} ({}) must be between {} and {}",
            name,
            brightness,
            MINIMUM_BRIGHTNESS,
            MAXIMUM_BRIGHTNESS
        );
    }
    Ok(())
}

fn parse_time(name: &str, value: &str) -> Result<TimeOfDay> {
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid {} time format: {}", name, e))
}

/// Day and night lengths in minutes for the given manual times.
pub(crate) fn calculate_day_night_durations(sunrise: TimeOfDay, sunset: TimeOfDay) -> (i64, i64) {
    let day = sunrise.until(sunset).num_minutes();
    (day, 24 * 60 - day)
}

/// Centered windows overlap when half the duration exceeds either period.
fn warn_on_overlapping_windows(sunrise: TimeOfDay, sunset: TimeOfDay, duration_mins: u64) {
    let (day_mins, night_mins) = calculate_day_night_durations(sunrise, sunset);
    let half = i64::try_from(duration_mins / 2).unwrap_or(i64::MAX);

    if half >= day_mins || half >= night_mins {
        log_warning!(
            "transition_duration ({duration_mins} min) is too long for a {day_mins} min day and {night_mins} min night."
        );
        log_indented!("The transition windows overlap; the sunrise window takes precedence.");
    }
}
