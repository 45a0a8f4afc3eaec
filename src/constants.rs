//! Application-wide defaults and limits.
//!
//! Default values are used when a configuration field is absent, limits are
//! enforced by `config::validation` and by [`ColorConfiguration`] clamping.
//!
//! [`ColorConfiguration`]: crate::core::color::ColorConfiguration

use std::time::Duration;

// # Color limits

/// Lowest color temperature the engine will ever produce (Kelvin).
pub const MINIMUM_TEMPERATURE: f64 = 500.0;
/// Highest color temperature the engine will ever produce (Kelvin).
pub const MAXIMUM_TEMPERATURE: f64 = 20000.0;
/// Lowest brightness, as a fraction of full output.
pub const MINIMUM_BRIGHTNESS: f64 = 0.1;
/// Full brightness.
pub const MAXIMUM_BRIGHTNESS: f64 = 1.0;

/// Neutral temperature, equivalent to an uncorrected display.
pub const NEUTRAL_TEMPERATURE: f64 = 6600.0;
pub const NEUTRAL_BRIGHTNESS: f64 = 1.0;

// # Cycle defaults

pub const DEFAULT_DAY_TEMPERATURE: f64 = 6600.0;
pub const DEFAULT_DAY_BRIGHTNESS: f64 = 1.0;
pub const DEFAULT_NIGHT_TEMPERATURE: f64 = 3900.0;
pub const DEFAULT_NIGHT_BRIGHTNESS: f64 = 0.85;

pub const DEFAULT_SUNRISE: &str = "07:20:00";
pub const DEFAULT_SUNSET: &str = "16:30:00";

/// Transition window length in minutes.
pub const DEFAULT_TRANSITION_DURATION: u64 = 90;
/// Transition window shift in minutes (negative moves it earlier).
pub const DEFAULT_TRANSITION_OFFSET: i64 = 0;
pub const MINIMUM_TRANSITION_DURATION: u64 = 0;
pub const MAXIMUM_TRANSITION_DURATION: u64 = 360;
pub const MAXIMUM_TRANSITION_OFFSET: i64 = 360;

pub const DEFAULT_SMOOTHING: bool = true;
pub const DEFAULT_TO_DAY_WHEN_INACTIVE: bool = false;
pub const DEFAULT_PAUSE_ON_FULLSCREEN: bool = false;
pub const DEFAULT_WHITELIST_ENABLED: bool = false;

// # Hotkey defaults

pub const DEFAULT_TOGGLE_HOTKEY: &str = "Ctrl+Alt+F12";
pub const DEFAULT_INCREASE_TEMPERATURE_HOTKEY: &str = "Ctrl+Alt+PageUp";
pub const DEFAULT_DECREASE_TEMPERATURE_HOTKEY: &str = "Ctrl+Alt+PageDown";
pub const DEFAULT_INCREASE_BRIGHTNESS_HOTKEY: &str = "Ctrl+Alt+Shift+PageUp";
pub const DEFAULT_DECREASE_BRIGHTNESS_HOTKEY: &str = "Ctrl+Alt+Shift+PageDown";
pub const DEFAULT_RESET_OFFSET_HOTKEY: &str = "Ctrl+Alt+Home";

// # Offsets

/// Temperature change applied by one offset hotkey press (Kelvin).
pub const TEMPERATURE_OFFSET_STEP: f64 = 100.0;
/// Brightness change applied by one offset hotkey press.
pub const BRIGHTNESS_OFFSET_STEP: f64 = 0.05;
/// Combined offset magnitude above which a reset is meaningful.
pub const OFFSET_RESET_THRESHOLD: f64 = 0.01;

// # Smoothing

/// Fraction of the remaining distance covered per smoothing step.
pub const SMOOTHING_RATE: f64 = 0.2;
/// Upper bound on the number of steps needed to reach any target.
pub const SMOOTHING_MAX_STEPS: u32 = 40_000;

// # Cadence

/// Instant and configuration update interval.
pub const FAST_TICK_INTERVAL: Duration = Duration::from_millis(50);
/// Pause recomputation interval.
pub const SLOW_TICK_INTERVAL: Duration = Duration::from_secs(1);

// # Cycle preview

/// Simulated time advanced per fast tick while previewing the cycle.
pub const PREVIEW_STEP_MINUTES: i64 = 5;
/// Total simulated span of a cycle preview.
pub const PREVIEW_SPAN_HOURS: i64 = 24;

// # Configuration files

pub const CONFIG_DIR_NAME: &str = "gammacycle";
pub const CONFIG_FILE_NAME: &str = "gammacycle.toml";
/// Debounce for configuration file change events.
pub const CONFIG_WATCH_DEBOUNCE: Duration = Duration::from_millis(500);
