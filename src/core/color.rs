//! Color configuration values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    MAXIMUM_BRIGHTNESS, MAXIMUM_TEMPERATURE, MINIMUM_BRIGHTNESS, MINIMUM_TEMPERATURE,
    NEUTRAL_BRIGHTNESS, NEUTRAL_TEMPERATURE,
};

/// A display color setting: temperature in Kelvin and brightness as a
/// fraction of full output.
///
/// Equality is exact. The engine relies on that: a smoothing step is
/// "finished" only when current and target compare equal, which the stepper
/// guarantees by landing exactly on the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorConfiguration {
    pub temperature: f64,
    pub brightness: f64,
}

impl ColorConfiguration {
    /// Uncorrected display output.
    pub const DEFAULT: ColorConfiguration = ColorConfiguration {
        temperature: NEUTRAL_TEMPERATURE,
        brightness: NEUTRAL_BRIGHTNESS,
    };

    pub const fn new(temperature: f64, brightness: f64) -> Self {
        Self {
            temperature,
            brightness,
        }
    }

    /// Both fields within their valid ranges.
    pub fn is_valid(&self) -> bool {
        (MINIMUM_TEMPERATURE..=MAXIMUM_TEMPERATURE).contains(&self.temperature)
            && (MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&self.brightness)
    }

    /// Clamp both fields into their valid ranges.
    pub fn clamped(&self) -> Self {
        Self {
            temperature: self
                .temperature
                .clamp(MINIMUM_TEMPERATURE, MAXIMUM_TEMPERATURE),
            brightness: self.brightness.clamp(MINIMUM_BRIGHTNESS, MAXIMUM_BRIGHTNESS),
        }
    }

    /// Add offsets to both fields, then clamp.
    pub fn with_offset(&self, temperature_offset: f64, brightness_offset: f64) -> Self {
        Self::new(
            self.temperature + temperature_offset,
            self.brightness + brightness_offset,
        )
        .clamped()
    }

    /// Linear blend: `0.0` gives `from`, `1.0` gives `to`.
    pub fn interpolate(from: &Self, to: &Self, fraction: f64) -> Self {
        if fraction <= 0.0 {
            return *from;
        }
        if fraction >= 1.0 {
            return *to;
        }
        let t = fraction;
        Self::new(
            from.temperature + (to.temperature - from.temperature) * t,
            from.brightness + (to.brightness - from.brightness) * t,
        )
    }
}

impl Default for ColorConfiguration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ColorConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}K @ {:.0}%",
            self.temperature,
            self.brightness * 100.0
        )
    }
}
