//! Transition window arithmetic.
//!
//! Pure functions over time-of-day values: deriving the four window
//! boundaries from solar times, range checks that cross midnight, and linear
//! progress through a window.

use chrono::Duration;

use crate::geo::SolarTimes;
use crate::time::TimeOfDay;

/// Start and end of the sunrise and sunset transition windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBoundaries {
    pub sunrise_start: TimeOfDay,
    pub sunrise_end: TimeOfDay,
    pub sunset_start: TimeOfDay,
    pub sunset_end: TimeOfDay,
}

/// Center a window of `transition_duration` on each solar event, then shift
/// both windows by `transition_offset`.
///
/// Values wrap at midnight, so a late sunset with a long window may end on
/// the next day.
pub fn compute_boundaries(
    solar_times: &SolarTimes,
    transition_duration: Duration,
    transition_offset: Duration,
) -> CycleBoundaries {
    let half = transition_duration / 2;
    // Odd-second durations keep their full length on the trailing side
    let rest = transition_duration - half;

    CycleBoundaries {
        sunrise_start: solar_times.sunrise - half + transition_offset,
        sunrise_end: solar_times.sunrise + rest + transition_offset,
        sunset_start: solar_times.sunset - half + transition_offset,
        sunset_end: solar_times.sunset + rest + transition_offset,
    }
}

/// Check if `time` falls within `[start, end)`, handling midnight crossings.
///
/// An empty range (`start == end`) contains nothing.
pub fn is_time_in_range(time: TimeOfDay, start: TimeOfDay, end: TimeOfDay) -> bool {
    use std::cmp::Ordering;

    match start.cmp(&end) {
        Ordering::Less => time >= start && time < end,
        Ordering::Greater => time >= start || time < end,
        Ordering::Equal => false,
    }
}

/// Linear position of `time` inside `[start, end)`, from `0.0` to `1.0`.
///
/// The caller is expected to check membership first. Times outside the window
/// are clamped; an empty window reports `1.0`.
pub fn window_progress(time: TimeOfDay, start: TimeOfDay, end: TimeOfDay) -> f64 {
    let total = start.until(end).num_seconds();
    if total <= 0 {
        return 1.0;
    }
    let elapsed = start.until(time).num_seconds();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

/// Point halfway through `[start, end)`, following the window across midnight.
fn window_midpoint(start: TimeOfDay, end: TimeOfDay) -> TimeOfDay {
    start + start.until(end) / 2
}

/// Whether `time` lies in the daytime arc between the (shifted) sunrise and
/// sunset events, ignoring the transition windows themselves.
///
/// The events sit at the window midpoints. Comparing against them rather
/// than the window edges keeps overlapping windows around a short day from
/// being read as a day that wraps past midnight.
pub fn is_daytime(time: TimeOfDay, boundaries: &CycleBoundaries) -> bool {
    let sunrise = window_midpoint(boundaries.sunrise_start, boundaries.sunrise_end);
    let sunset = window_midpoint(boundaries.sunset_start, boundaries.sunset_end);
    is_time_in_range(time, sunrise, sunset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn solar(sunrise: &str, sunset: &str) -> SolarTimes {
        SolarTimes::new(tod(sunrise), tod(sunset))
    }

    #[test]
    fn test_boundaries_center_on_events() {
        let b = compute_boundaries(
            &solar("06:00:00", "18:00:00"),
            Duration::hours(1),
            Duration::zero(),
        );
        assert_eq!(b.sunrise_start, tod("05:30:00"));
        assert_eq!(b.sunrise_end, tod("06:30:00"));
        assert_eq!(b.sunset_start, tod("17:30:00"));
        assert_eq!(b.sunset_end, tod("18:30:00"));
    }

    #[test]
    fn test_boundaries_shift_by_offset() {
        let b = compute_boundaries(
            &solar("06:00:00", "18:00:00"),
            Duration::hours(1),
            Duration::minutes(-45),
        );
        assert_eq!(b.sunrise_start, tod("04:45:00"));
        assert_eq!(b.sunrise_end, tod("05:45:00"));
        assert_eq!(b.sunset_start, tod("16:45:00"));
        assert_eq!(b.sunset_end, tod("17:45:00"));
    }

    #[test]
    fn test_boundaries_wrap_past_midnight() {
        let b = compute_boundaries(
            &solar("06:00:00", "23:40:00"),
            Duration::hours(1),
            Duration::zero(),
        );
        assert_eq!(b.sunset_start, tod("23:10:00"));
        assert_eq!(b.sunset_end, tod("00:10:00"));
    }

    #[test]
    fn test_zero_duration_collapses_windows() {
        let b = compute_boundaries(
            &solar("06:00:00", "18:00:00"),
            Duration::zero(),
            Duration::zero(),
        );
        assert_eq!(b.sunrise_start, b.sunrise_end);
        assert!(!is_time_in_range(tod("06:00:00"), b.sunrise_start, b.sunrise_end));
    }

    #[test]
    fn test_range_is_half_open() {
        let (start, end) = (tod("05:30:00"), tod("06:30:00"));
        assert!(is_time_in_range(tod("05:30:00"), start, end));
        assert!(is_time_in_range(tod("06:29:59"), start, end));
        assert!(!is_time_in_range(tod("06:30:00"), start, end));
    }

    #[test]
    fn test_range_across_midnight() {
        let (start, end) = (tod("23:00:00"), tod("01:00:00"));
        assert!(is_time_in_range(tod("23:30:00"), start, end));
        assert!(is_time_in_range(tod("00:30:00"), start, end));
        assert!(!is_time_in_range(tod("12:00:00"), start, end));
    }

    #[test]
    fn test_progress_across_midnight() {
        let p = window_progress(tod("00:00:00"), tod("23:00:00"), tod("01:00:00"));
        assert!((p - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_daytime_arc() {
        let b = compute_boundaries(
            &solar("06:00:00", "18:00:00"),
            Duration::hours(1),
            Duration::zero(),
        );
        assert!(is_daytime(tod("12:00:00"), &b));
        assert!(is_daytime(tod("06:30:00"), &b));
        assert!(!is_daytime(tod("18:30:00"), &b));
        assert!(!is_daytime(tod("02:00:00"), &b));
    }

    #[test]
    fn test_overlapping_windows_keep_night_outside() {
        // A one-hour day with 90 minute windows: sunrise ends after sunset starts
        let b = compute_boundaries(
            &solar("11:30:00", "12:30:00"),
            Duration::minutes(90),
            Duration::zero(),
        );
        assert!(b.sunrise_end > b.sunset_start);
        assert!(!is_daytime(tod("23:00:00"), &b));
        assert!(!is_daytime(tod("03:00:00"), &b));
        assert!(is_daytime(tod("12:00:00"), &b));
    }

    #[test]
    fn test_daytime_wraps_past_midnight() {
        let b = compute_boundaries(
            &solar("14:00:00", "04:00:00"),
            Duration::hours(1),
            Duration::zero(),
        );
        assert!(is_daytime(tod("23:00:00"), &b));
        assert!(is_daytime(tod("02:00:00"), &b));
        assert!(!is_daytime(tod("09:00:00"), &b));
    }
}
