//! User-adjustable temperature and brightness offsets.
//!
//! Offsets shift the interpolated configuration up or down on top of the
//! day/night cycle. Every adjustment is checked against the configuration it
//! would affect: once the adjusted value is pinned at a limit, further presses
//! in that direction change nothing, so the offset cannot grow past the point
//! where it has a visible effect.

use crate::constants::OFFSET_RESET_THRESHOLD;
use crate::core::color::ColorConfiguration;

/// Offsets applied on top of the interpolated configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetManager {
    temperature_offset: f64,
    brightness_offset: f64,
}

impl OffsetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature_offset(&self) -> f64 {
        self.temperature_offset
    }

    pub fn brightness_offset(&self) -> f64 {
        self.brightness_offset
    }

    /// `base` with both offsets applied and clamped.
    pub fn apply(&self, base: &ColorConfiguration) -> ColorConfiguration {
        base.with_offset(self.temperature_offset, self.brightness_offset)
    }

    /// Raise the temperature offset by `delta`. Returns whether it changed.
    pub fn increase_temperature(&mut self, base: &ColorConfiguration, delta: f64) -> bool {
        self.adjust_temperature(base, delta.abs())
    }

    /// Lower the temperature offset by `delta`. Returns whether it changed.
    pub fn decrease_temperature(&mut self, base: &ColorConfiguration, delta: f64) -> bool {
        self.adjust_temperature(base, -delta.abs())
    }

    /// Raise the brightness offset by `delta`. Returns whether it changed.
    pub fn increase_brightness(&mut self, base: &ColorConfiguration, delta: f64) -> bool {
        self.adjust_brightness(base, delta.abs())
    }

    /// Lower the brightness offset by `delta`. Returns whether it changed.
    pub fn decrease_brightness(&mut self, base: &ColorConfiguration, delta: f64) -> bool {
        self.adjust_brightness(base, -delta.abs())
    }

    /// Zero both offsets.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when the offsets are large enough for a reset to matter.
    pub fn can_reset(&self) -> bool {
        self.temperature_offset.abs() + self.brightness_offset.abs() > OFFSET_RESET_THRESHOLD
    }

    fn adjust_temperature(&mut self, base: &ColorConfiguration, delta: f64) -> bool {
        let candidate = Self {
            temperature_offset: self.temperature_offset + delta,
            ..*self
        };
        self.accept_if_visible(base, candidate)
    }

    fn adjust_brightness(&mut self, base: &ColorConfiguration, delta: f64) -> bool {
        let candidate = Self {
            brightness_offset: self.brightness_offset + delta,
            ..*self
        };
        self.accept_if_visible(base, candidate)
    }

    fn accept_if_visible(&mut self, base: &ColorConfiguration, candidate: Self) -> bool {
        if candidate.apply(base) == self.apply(base) {
            return false;
        }
        *self = candidate;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: ColorConfiguration = ColorConfiguration::new(6600.0, 0.9);

    #[test]
    fn test_increase_changes_offset() {
        let mut offsets = OffsetManager::new();
        assert!(offsets.increase_temperature(&BASE, 100.0));
        assert_eq!(offsets.temperature_offset(), 100.0);
        assert_eq!(offsets.apply(&BASE).temperature, 6700.0);
    }

    #[test]
    fn test_increase_at_limit_is_noop() {
        let mut offsets = OffsetManager::new();
        // 0.9 + 0.05 + 0.05 reaches 1.0, the third press has no visible effect
        assert!(offsets.increase_brightness(&BASE, 0.05));
        assert!(offsets.increase_brightness(&BASE, 0.05));
        let before = offsets.brightness_offset();
        assert!(!offsets.increase_brightness(&BASE, 0.05));
        assert_eq!(offsets.brightness_offset(), before);
    }

    #[test]
    fn test_decrease_toward_minimum() {
        let mut offsets = OffsetManager::new();
        let cold = ColorConfiguration::new(550.0, 0.5);
        assert!(offsets.decrease_temperature(&cold, 100.0));
        assert_eq!(offsets.apply(&cold).temperature, 500.0);
        assert!(!offsets.decrease_temperature(&cold, 100.0));
        assert_eq!(offsets.temperature_offset(), -100.0);
    }

    #[test]
    fn test_reset_and_can_reset() {
        let mut offsets = OffsetManager::new();
        assert!(!offsets.can_reset());
        offsets.decrease_brightness(&BASE, 0.05);
        assert!(offsets.can_reset());
        offsets.reset();
        assert!(!offsets.can_reset());
        assert_eq!(offsets, OffsetManager::default());
    }

    #[test]
    fn test_tiny_offsets_do_not_enable_reset() {
        let mut offsets = OffsetManager::new();
        offsets.increase_brightness(&BASE, 0.005);
        assert!(!offsets.can_reset());
    }
}
