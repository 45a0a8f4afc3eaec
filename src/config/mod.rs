//! Configuration system for gammacycle.
//!
//! This module turns the `gammacycle.toml` file into the immutable
//! [`Settings`] snapshot the engine consumes, and keeps that snapshot fresh
//! while the program runs.
//!
//! ## Configuration Sources
//!
//! 1. An explicit path passed with `--config`
//! 2. **XDG_CONFIG_HOME**/gammacycle/gammacycle.toml (created with defaults if missing)
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Color targets]
//! day_temperature = 6600           # Color temperature during day (500-20000) Kelvin
//! day_brightness = 1.0             # Brightness during day (0.1-1.0)
//! night_temperature = 3900         # Color temperature during night (500-20000) Kelvin
//! night_brightness = 0.85          # Brightness during night (0.1-1.0)
//!
//! #[Transitions]
//! transition_duration = 90         # Length of each transition window in minutes (0-360)
//! transition_offset = 0            # Shift both windows by minutes (-360 to 360)
//! smoothing = true                 # Ease toward the target instead of jumping
//!
//! #[Solar times]
//! manual_sun_times = false         # Use the manual times even when coordinates are set
//! sunrise = "07:20:00"             # Manual sunrise (HH:MM:SS)
//! sunset = "16:30:00"              # Manual sunset (HH:MM:SS)
//! latitude = 52.520008             # Geographic latitude
//! longitude = 13.404954            # Geographic longitude
//!
//! #[Activity]
//! default_to_day_when_inactive = false
//! pause_on_fullscreen = false
//! whitelist_enabled = false
//! whitelist = ["mpv", "blender"]
//!
//! #[Hotkeys]
//! toggle_hotkey = "Ctrl+Alt+F12"
//! ```
//!
//! Every field is optional; absent fields take the defaults in
//! [`crate::constants`].
//!
//! ## Hot Reload
//!
//! [`FileSettingsSource`] watches the file and republishes the snapshot after
//! every valid edit. Invalid edits are reported and the previous snapshot
//! stays in effect.

pub mod builder;
pub mod loading;
pub mod source;
pub mod validation;
pub mod watcher;

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::core::color::ColorConfiguration;
use crate::geo::GeoLocation;
use crate::io::hotkeys::HotkeyAction;
use crate::time::TimeOfDay;

// Re-export public API
pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path};
pub use source::{SettingsSource, SettingsStore, Subscription};
pub use validation::validate_config;
pub use watcher::FileSettingsSource;

/// Raw configuration as written in `gammacycle.toml`.
///
/// Fields are optional so partial files stay valid. Use
/// [`Config::to_settings`] to resolve defaults into a [`Settings`] snapshot.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub day_temperature: Option<f64>,
    pub day_brightness: Option<f64>,
    pub night_temperature: Option<f64>,
    pub night_brightness: Option<f64>,

    /// Transition window length in minutes.
    pub transition_duration: Option<u64>,
    /// Window shift in minutes; negative values move both windows earlier.
    pub transition_offset: Option<i64>,
    pub smoothing: Option<bool>,

    /// Force the manual sunrise/sunset even when coordinates are configured.
    pub manual_sun_times: Option<bool>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub default_to_day_when_inactive: Option<bool>,
    pub pause_on_fullscreen: Option<bool>,
    pub whitelist_enabled: Option<bool>,
    pub whitelist: Option<Vec<String>>,

    pub toggle_hotkey: Option<String>,
    pub increase_temperature_hotkey: Option<String>,
    pub decrease_temperature_hotkey: Option<String>,
    pub increase_brightness_hotkey: Option<String>,
    pub decrease_brightness_hotkey: Option<String>,
    pub reset_offset_hotkey: Option<String>,
}

/// Key combinations for each hotkey action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBindings {
    pub toggle: String,
    pub increase_temperature_offset: String,
    pub decrease_temperature_offset: String,
    pub increase_brightness_offset: String,
    pub decrease_brightness_offset: String,
    pub reset_offset: String,
}

impl Default for HotkeyBindings {
    fn default() -> Self {
        Self {
            toggle: DEFAULT_TOGGLE_HOTKEY.to_string(),
            increase_temperature_offset: DEFAULT_INCREASE_TEMPERATURE_HOTKEY.to_string(),
            decrease_temperature_offset: DEFAULT_DECREASE_TEMPERATURE_HOTKEY.to_string(),
            increase_brightness_offset: DEFAULT_INCREASE_BRIGHTNESS_HOTKEY.to_string(),
            decrease_brightness_offset: DEFAULT_DECREASE_BRIGHTNESS_HOTKEY.to_string(),
            reset_offset: DEFAULT_RESET_OFFSET_HOTKEY.to_string(),
        }
    }
}

impl HotkeyBindings {
    /// The key combination bound to `action`.
    pub fn binding_for(&self, action: HotkeyAction) -> &str {
        match action {
            HotkeyAction::Toggle => &self.toggle,
            HotkeyAction::IncreaseTemperatureOffset => &self.increase_temperature_offset,
            HotkeyAction::DecreaseTemperatureOffset => &self.decrease_temperature_offset,
            HotkeyAction::IncreaseBrightnessOffset => &self.increase_brightness_offset,
            HotkeyAction::DecreaseBrightnessOffset => &self.decrease_brightness_offset,
            HotkeyAction::ResetOffset => &self.reset_offset,
        }
    }

    /// Every action paired with its binding, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (HotkeyAction, &str)> {
        HotkeyAction::ALL
            .into_iter()
            .map(move |action| (action, self.binding_for(action)))
    }
}

/// Resolved, immutable settings snapshot consumed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub day: ColorConfiguration,
    pub night: ColorConfiguration,
    pub location: Option<GeoLocation>,
    pub manual_sunrise: TimeOfDay,
    pub manual_sunset: TimeOfDay,
    pub manual_mode: bool,
    pub transition_duration: Duration,
    pub transition_offset: Duration,
    pub smoothing: bool,
    pub default_to_day_when_inactive: bool,
    pub pause_on_fullscreen: bool,
    pub whitelist_enabled: bool,
    pub whitelist: Option<Vec<String>>,
    pub hotkeys: HotkeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            day: ColorConfiguration::new(DEFAULT_DAY_TEMPERATURE, DEFAULT_DAY_BRIGHTNESS),
            night: ColorConfiguration::new(DEFAULT_NIGHT_TEMPERATURE, DEFAULT_NIGHT_BRIGHTNESS),
            location: None,
            manual_sunrise: DEFAULT_SUNRISE.parse().unwrap_or(TimeOfDay::MIDNIGHT),
            manual_sunset: DEFAULT_SUNSET.parse().unwrap_or(TimeOfDay::MIDNIGHT),
            manual_mode: false,
            transition_duration: Duration::minutes(DEFAULT_TRANSITION_DURATION as i64),
            transition_offset: Duration::minutes(DEFAULT_TRANSITION_OFFSET),
            smoothing: DEFAULT_SMOOTHING,
            default_to_day_when_inactive: DEFAULT_TO_DAY_WHEN_INACTIVE,
            pause_on_fullscreen: DEFAULT_PAUSE_ON_FULLSCREEN,
            whitelist_enabled: DEFAULT_WHITELIST_ENABLED,
            whitelist: None,
            hotkeys: HotkeyBindings::default(),
        }
    }
}

impl Config {
    /// Resolve defaults and parse time strings into a [`Settings`] snapshot.
    ///
    /// The config is expected to have passed [`validate_config`]; this only
    /// fails on values that cannot be represented at all.
    pub fn to_settings(&self) -> Result<Settings> {
        let manual_sunrise: TimeOfDay = self
            .sunrise
            .as_deref()
            .unwrap_or(DEFAULT_SUNRISE)
            .parse::<TimeOfDay>()
            .map_err(anyhow::Error::msg)
            .context("Invalid sunrise time format in config. Use HH:MM:SS format")?;
        let manual_sunset: TimeOfDay = self
            .sunset
            .as_deref()
            .unwrap_or(DEFAULT_SUNSET)
            .parse::<TimeOfDay>()
            .map_err(anyhow::Error::msg)
            .context("Invalid sunset time format in config. Use HH:MM:SS format")?;

        let location = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation::new(latitude, longitude)),
            _ => None,
        };

        let duration_minutes = self
            .transition_duration
            .unwrap_or(DEFAULT_TRANSITION_DURATION);
        let duration_minutes =
            i64::try_from(duration_minutes).context("Transition duration is out of range")?;

        let defaults = HotkeyBindings::default();
        let hotkeys = HotkeyBindings {
            toggle: self.toggle_hotkey.clone().unwrap_or(defaults.toggle),
            increase_temperature_offset: self
                .increase_temperature_hotkey
                .clone()
                .unwrap_or(defaults.increase_temperature_offset),
            decrease_temperature_offset: self
                .decrease_temperature_hotkey
                .clone()
                .unwrap_or(defaults.decrease_temperature_offset),
            increase_brightness_offset: self
                .increase_brightness_hotkey
                .clone()
                .unwrap_or(defaults.increase_brightness_offset),
            decrease_brightness_offset: self
                .decrease_brightness_hotkey
                .clone()
                .unwrap_or(defaults.decrease_brightness_offset),
            reset_offset: self
                .reset_offset_hotkey
                .clone()
                .unwrap_or(defaults.reset_offset),
        };

        Ok(Settings {
            day: ColorConfiguration::new(
                self.day_temperature.unwrap_or(DEFAULT_DAY_TEMPERATURE),
                self.day_brightness.unwrap_or(DEFAULT_DAY_BRIGHTNESS),
            ),
            night: ColorConfiguration::new(
                self.night_temperature.unwrap_or(DEFAULT_NIGHT_TEMPERATURE),
                self.night_brightness.unwrap_or(DEFAULT_NIGHT_BRIGHTNESS),
            ),
            location,
            manual_sunrise,
            manual_sunset,
            manual_mode: self.manual_sun_times.unwrap_or(false),
            transition_duration: Duration::minutes(duration_minutes),
            transition_offset: Duration::minutes(
                self.transition_offset.unwrap_or(DEFAULT_TRANSITION_OFFSET),
            ),
            smoothing: self.smoothing.unwrap_or(DEFAULT_SMOOTHING),
            default_to_day_when_inactive: self
                .default_to_day_when_inactive
                .unwrap_or(DEFAULT_TO_DAY_WHEN_INACTIVE),
            pause_on_fullscreen: self
                .pause_on_fullscreen
                .unwrap_or(DEFAULT_PAUSE_ON_FULLSCREEN),
            whitelist_enabled: self.whitelist_enabled.unwrap_or(DEFAULT_WHITELIST_ENABLED),
            whitelist: self.whitelist.clone(),
            hotkeys,
        })
    }
}

impl Settings {
    /// Print a summary of the snapshot under a `Loaded ...` block.
    pub fn log_summary(&self, source: &str) {
        log_block_start!("Loaded {}", source);

        match (&self.location, self.manual_mode) {
            (Some(location), false) => {
                let lat_dir = if location.latitude >= 0.0 { "N" } else { "S" };
                let lon_dir = if location.longitude >= 0.0 { "E" } else { "W" };
                log_indented!(
                    "Location: {:.3}°{}, {:.3}°{}",
                    location.latitude.abs(),
                    lat_dir,
                    location.longitude.abs(),
                    lon_dir
                );
            }
            _ => {
                log_indented!("Sunrise: {} (manual)", self.manual_sunrise);
                log_indented!("Sunset: {} (manual)", self.manual_sunset);
            }
        }

        log_indented!("Day: {}", self.day);
        log_indented!("Night: {}", self.night);
        log_indented!(
            "Transition duration: {} minutes",
            self.transition_duration.num_minutes()
        );
        if !self.transition_offset.is_zero() {
            log_indented!(
                "Transition offset: {} minutes",
                self.transition_offset.num_minutes()
            );
        }
        log_indented!(
            "Smoothing: {}",
            if self.smoothing { "enabled" } else { "disabled" }
        );
        if self.pause_on_fullscreen {
            log_indented!("Pausing for full-screen applications");
        }
        if self.whitelist_enabled {
            let count = self.whitelist.as_ref().map_or(0, Vec::len);
            log_indented!("Whitelist: {} application(s)", count);
        }
    }
}

#[cfg(test)]
mod tests;
