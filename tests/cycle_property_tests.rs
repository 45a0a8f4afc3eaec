use chrono::Duration;
use proptest::prelude::*;

use gammacycle::constants::{
    MAXIMUM_BRIGHTNESS, MAXIMUM_TEMPERATURE, MAXIMUM_TRANSITION_DURATION,
    MAXIMUM_TRANSITION_OFFSET, MINIMUM_BRIGHTNESS, MINIMUM_TEMPERATURE, SMOOTHING_RATE,
};
use gammacycle::core::color::ColorConfiguration;
use gammacycle::core::offsets::OffsetManager;
use gammacycle::core::period::{
    CyclePhase, compute_boundaries, cycle_phase, is_time_in_range, target_configuration,
};
use gammacycle::core::smoothing::step_toward;
use gammacycle::geo::SolarTimes;
use gammacycle::time::TimeOfDay;

/// Generate valid color configurations
fn configuration_strategy() -> impl Strategy<Value = ColorConfiguration> {
    (
        MINIMUM_TEMPERATURE..=MAXIMUM_TEMPERATURE,
        MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS,
    )
        .prop_map(|(temperature, brightness)| ColorConfiguration::new(temperature, brightness))
}

/// Generate a time of day with second resolution
fn time_strategy() -> impl Strategy<Value = TimeOfDay> {
    (0u32..86_400).prop_map(|s| TimeOfDay::MIDNIGHT + Duration::seconds(i64::from(s)))
}

/// Any distinct sunrise and sunset, including days shorter than the
/// transition windows and days that wrap past midnight
fn schedule_strategy() -> impl Strategy<Value = (SolarTimes, Duration, Duration)> {
    (
        0i64..1440,
        1i64..1440,
        0i64..=MAXIMUM_TRANSITION_DURATION as i64,
        -MAXIMUM_TRANSITION_OFFSET..=MAXIMUM_TRANSITION_OFFSET,
    )
        .prop_map(|(rise, day_length, duration, offset)| {
            let sunrise = TimeOfDay::MIDNIGHT + Duration::minutes(rise);
            let sunset = sunrise + Duration::minutes(day_length);
            (
                SolarTimes::new(sunrise, sunset),
                Duration::minutes(duration),
                Duration::minutes(offset),
            )
        })
}

mod interpolation_properties {
    use super::*;

    proptest! {
        /// Outside both windows the target is exactly day or night
        #[test]
        fn prop_outside_windows_is_exact(
            (solar, duration, offset) in schedule_strategy(),
            day in configuration_strategy(),
            night in configuration_strategy(),
            time in time_strategy(),
        ) {
            let boundaries = compute_boundaries(&solar, duration, offset);
            let target = target_configuration(&boundaries, &day, &night, time, true, false);

            match cycle_phase(time, &boundaries) {
                CyclePhase::Day => prop_assert_eq!(target, day),
                CyclePhase::Night => prop_assert_eq!(target, night),
                CyclePhase::Sunrise { progress } | CyclePhase::Sunset { progress } => {
                    prop_assert!((0.0..=1.0).contains(&progress));
                }
            }
        }

        /// Outside the windows, day means between the shifted sunrise and sunset
        #[test]
        fn prop_day_follows_solar_arc(
            (solar, duration, offset) in schedule_strategy(),
            time in time_strategy(),
        ) {
            let boundaries = compute_boundaries(&solar, duration, offset);
            let in_arc = is_time_in_range(time, solar.sunrise + offset, solar.sunset + offset);

            match cycle_phase(time, &boundaries) {
                CyclePhase::Day => prop_assert!(in_arc),
                CyclePhase::Night => prop_assert!(!in_arc),
                CyclePhase::Sunrise { .. } | CyclePhase::Sunset { .. } => {}
            }
        }

        /// Blended targets stay between the day and night values
        #[test]
        fn prop_blend_is_bounded(
            (solar, duration, offset) in schedule_strategy(),
            day in configuration_strategy(),
            night in configuration_strategy(),
            time in time_strategy(),
        ) {
            let boundaries = compute_boundaries(&solar, duration, offset);
            let target = target_configuration(&boundaries, &day, &night, time, true, false);

            let low = day.temperature.min(night.temperature) - 1e-9;
            let high = day.temperature.max(night.temperature) + 1e-9;
            prop_assert!(target.temperature >= low && target.temperature <= high);
            prop_assert!(target.is_valid());
        }

        /// Inactive targets ignore the time of day entirely
        #[test]
        fn prop_inactive_ignores_time(
            (solar, duration, offset) in schedule_strategy(),
            day in configuration_strategy(),
            night in configuration_strategy(),
            time in time_strategy(),
            to_day in any::<bool>(),
        ) {
            let boundaries = compute_boundaries(&solar, duration, offset);
            let target = target_configuration(&boundaries, &day, &night, time, false, to_day);
            let expected = if to_day { day } else { ColorConfiguration::DEFAULT };
            prop_assert_eq!(target, expected);
        }
    }
}

mod smoothing_properties {
    use super::*;

    proptest! {
        /// A configuration already at its target does not move
        #[test]
        fn prop_fixed_point(config in configuration_strategy(), max_steps in 1u32..50_000) {
            prop_assert_eq!(step_toward(&config, &config, max_steps, SMOOTHING_RATE), config);
        }

        /// Any target is reached within max_steps applications
        #[test]
        fn prop_reaches_target(
            from in configuration_strategy(),
            to in configuration_strategy(),
            max_steps in 1u32..2_000,
            rate in 0.0f64..=1.0,
        ) {
            let mut current = from;
            for _ in 0..max_steps {
                current = step_toward(&current, &to, max_steps, rate);
            }
            prop_assert_eq!(current, to);
        }

        /// Each step closes the gap without crossing the target
        #[test]
        fn prop_monotone_approach(
            from in configuration_strategy(),
            to in configuration_strategy(),
        ) {
            let next = step_toward(&from, &to, 40_000, SMOOTHING_RATE);
            let before = (to.temperature - from.temperature).abs();
            let after = (to.temperature - next.temperature).abs();
            prop_assert!(after <= before);
            let same_side =
                (to.temperature - next.temperature) * (to.temperature - from.temperature) >= 0.0;
            prop_assert!(same_side);
        }
    }
}

mod offset_properties {
    use super::*;

    proptest! {
        /// Increasing the temperature offset either does nothing (pinned at
        /// the limit) or strictly increases it
        #[test]
        fn prop_increase_temperature(
            base in configuration_strategy(),
            presses in 0usize..250,
            delta in 1.0f64..500.0,
        ) {
            let mut offsets = OffsetManager::new();
            for _ in 0..presses {
                offsets.increase_temperature(&base, delta);
            }

            let before = offsets;
            let changed = offsets.increase_temperature(&base, delta);
            if changed {
                prop_assert!(offsets.temperature_offset() > before.temperature_offset());
            } else {
                prop_assert_eq!(offsets, before);
                prop_assert_eq!(before.apply(&base).temperature, MAXIMUM_TEMPERATURE);
            }
        }

        /// Applied offsets never leave the valid range
        #[test]
        fn prop_applied_offsets_are_clamped(
            base in configuration_strategy(),
            up in 0usize..100,
            down in 0usize..100,
        ) {
            let mut offsets = OffsetManager::new();
            for _ in 0..up {
                offsets.increase_brightness(&base, 0.05);
                offsets.increase_temperature(&base, 100.0);
            }
            for _ in 0..down {
                offsets.decrease_brightness(&base, 0.05);
            }
            prop_assert!(offsets.apply(&base).is_valid());

            offsets.reset();
            prop_assert!(!offsets.can_reset());
            prop_assert_eq!(offsets.apply(&base), base);
        }
    }
}
