//! Target configuration for an instant.

use crate::core::color::ColorConfiguration;
use crate::time::TimeOfDay;

use super::calculations::{CycleBoundaries, is_daytime, is_time_in_range, window_progress};

/// Where in the cycle a time of day falls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CyclePhase {
    Day,
    Night,
    /// Inside the sunrise window; progress runs from 0 (night) to 1 (day).
    Sunrise { progress: f64 },
    /// Inside the sunset window; progress runs from 0 (day) to 1 (night).
    Sunset { progress: f64 },
}

/// Locate `time` among the four boundaries.
///
/// When the windows overlap (very long transitions around short days or
/// nights) the sunrise window takes precedence.
pub fn cycle_phase(time: TimeOfDay, boundaries: &CycleBoundaries) -> CyclePhase {
    if is_time_in_range(time, boundaries.sunrise_start, boundaries.sunrise_end) {
        return CyclePhase::Sunrise {
            progress: window_progress(time, boundaries.sunrise_start, boundaries.sunrise_end),
        };
    }

    if is_time_in_range(time, boundaries.sunset_start, boundaries.sunset_end) {
        return CyclePhase::Sunset {
            progress: window_progress(time, boundaries.sunset_start, boundaries.sunset_end),
        };
    }

    if is_daytime(time, boundaries) {
        CyclePhase::Day
    } else {
        CyclePhase::Night
    }
}

/// Blend of day and night configurations for a given phase.
pub fn interpolate_phase(
    phase: CyclePhase,
    day: &ColorConfiguration,
    night: &ColorConfiguration,
) -> ColorConfiguration {
    match phase {
        CyclePhase::Day => *day,
        CyclePhase::Night => *night,
        CyclePhase::Sunrise { progress } => ColorConfiguration::interpolate(night, day, progress),
        CyclePhase::Sunset { progress } => ColorConfiguration::interpolate(day, night, progress),
    }
}

/// The configuration that should be shown at `time`.
///
/// When the cycle is not active this is the day configuration (if
/// `default_to_day_when_inactive`) or the neutral default. Offsets are not
/// applied here.
pub fn target_configuration(
    boundaries: &CycleBoundaries,
    day: &ColorConfiguration,
    night: &ColorConfiguration,
    time: TimeOfDay,
    is_active: bool,
    default_to_day_when_inactive: bool,
) -> ColorConfiguration {
    if !is_active {
        return if default_to_day_when_inactive {
            *day
        } else {
            ColorConfiguration::DEFAULT
        };
    }

    interpolate_phase(cycle_phase(time, boundaries), day, night)
}
