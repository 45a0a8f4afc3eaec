//! Display and formatting utilities for geo module.
//!
//! Prints the solar times and transition windows the engine is working with,
//! in the same block style as the rest of the log.

use chrono::Duration;

use crate::core::period::CycleBoundaries;
use crate::geo::{SolarSource, SolarTimes};

/// Log sunrise, sunset and the resulting transition windows.
pub fn log_solar_summary(solar: &SolarTimes, source: SolarSource, boundaries: &CycleBoundaries) {
    log_block_start!("Solar times ({})", source.display_name());
    log_indented!("Sunrise: {}", solar.sunrise);
    log_indented!("Sunset: {}", solar.sunset);

    let day = solar.sunrise.until(solar.sunset);
    let night = solar.sunset.until(solar.sunrise);
    log_indented!(
        "Day length: {}, night length: {}",
        format_duration(day),
        format_duration(night)
    );

    log_indented!(
        "Sunrise transition: {} to {}",
        boundaries.sunrise_start,
        boundaries.sunrise_end
    );
    log_indented!(
        "Sunset transition: {} to {}",
        boundaries.sunset_start,
        boundaries.sunset_end
    );

    if source == SolarSource::Fallback {
        log_warning!("Location gave no usable sunrise/sunset today, using manual times");
    }
}

/// Format a duration as `Xh Ym`.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Format a timer delay as `Xh Ym`. Works for any length a timer accepts.
pub fn format_delay(delay: std::time::Duration) -> String {
    let minutes = delay.as_secs() / 60;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(754)), "12h 34m");
        assert_eq!(format_duration(Duration::minutes(5)), "0h 05m");
        assert_eq!(format_duration(Duration::zero()), "0h 00m");
    }

    #[test]
    fn test_format_delay_beyond_chrono_range() {
        assert_eq!(format_delay(std::time::Duration::from_secs(90 * 60)), "1h 30m");

        let huge = std::time::Duration::MAX;
        assert!(chrono::Duration::from_std(huge).is_err());
        let minutes = u64::MAX / 60;
        assert_eq!(
            format_delay(huge),
            format!("{}h {:02}m", minutes / 60, minutes % 60)
        );
    }
}
