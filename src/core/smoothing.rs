//! Bounded easing of the current configuration toward its target.
//!
//! Every fast tick the engine moves the applied configuration a fraction of
//! the remaining distance to the target instead of jumping there. This is an
//! exponential approach with a floor on the step size: far from the target
//! the step is `rate` of the gap, close to it the floor takes over so the
//! value lands exactly on the target in finite time.
//!
//! The floor is `span / max_steps`, where `span` is the full valid range of
//! the field. Since no gap can exceed the span and every step closes at least
//! the floor, `max_steps` applications always suffice to reach the target.

use crate::constants::{
    MAXIMUM_BRIGHTNESS, MAXIMUM_TEMPERATURE, MINIMUM_BRIGHTNESS, MINIMUM_TEMPERATURE,
};
use crate::core::color::ColorConfiguration;

/// Smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    /// Upper bound on steps to reach any target from any valid configuration.
    pub max_steps: u32,
    /// Fraction of the remaining gap closed per step.
    pub rate: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            max_steps: crate::constants::SMOOTHING_MAX_STEPS,
            rate: crate::constants::SMOOTHING_RATE,
        }
    }
}

impl Smoothing {
    pub fn step(&self, current: &ColorConfiguration, target: &ColorConfiguration) -> ColorConfiguration {
        step_toward(current, target, self.max_steps, self.rate)
    }
}

/// Advance `current` one step toward `target`.
///
/// Returns `current` unchanged when it already equals `target`.
pub fn step_toward(
    current: &ColorConfiguration,
    target: &ColorConfiguration,
    max_steps: u32,
    rate: f64,
) -> ColorConfiguration {
    if current == target {
        return *current;
    }

    let temperature_floor = step_floor(MAXIMUM_TEMPERATURE - MINIMUM_TEMPERATURE, max_steps);
    let brightness_floor = step_floor(MAXIMUM_BRIGHTNESS - MINIMUM_BRIGHTNESS, max_steps);

    ColorConfiguration::new(
        step_value(current.temperature, target.temperature, rate, temperature_floor),
        step_value(current.brightness, target.brightness, rate, brightness_floor),
    )
}

/// Smallest step for a field spanning `span`.
///
/// Padded by a relative 1e-9 so accumulated rounding over `max_steps`
/// additions cannot leave a sliver of gap on the last step.
fn step_floor(span: f64, max_steps: u32) -> f64 {
    span / f64::from(max_steps.max(1)) * (1.0 + 1e-9)
}

/// Move `from` toward `to` by `max(|gap| * rate, floor)`, never overshooting.
fn step_value(from: f64, to: f64, rate: f64, floor: f64) -> f64 {
    let gap = to - from;
    let step = (gap.abs() * rate.clamp(0.0, 1.0)).max(floor);

    if gap.abs() <= step {
        to
    } else {
        from + step.copysign(gap)
    }
}
