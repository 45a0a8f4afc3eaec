//! Time-of-day values without a date.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A wall-clock time of day (hour, minute, second), independent of any date.
///
/// Arithmetic wraps around midnight, so `23:30 + 1h == 00:30`. Use
/// [`TimeOfDay::next_occurrence`] to anchor it to a concrete instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(NaiveTime::MIN);

    /// Build from hour/minute/second, `None` when out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Time of day of a concrete instant, in that instant's timezone.
    /// Sub-second precision is dropped.
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let time = instant.time();
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_from_midnight(&self) -> i64 {
        i64::from(self.0.num_seconds_from_midnight())
    }

    /// Forward distance from `self` to `other`, wrapping past midnight.
    ///
    /// Always in `0..24h`; equal times give zero.
    pub fn until(&self, other: TimeOfDay) -> Duration {
        let diff = other.seconds_from_midnight() - self.seconds_from_midnight();
        Duration::seconds(diff.rem_euclid(SECONDS_PER_DAY))
    }

    /// The first instant at or after `after` whose time of day equals `self`.
    ///
    /// Local times skipped by a DST gap resolve to the first valid instant
    /// after the gap; ambiguous local times resolve to the earliest instant.
    pub fn next_occurrence<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = after.timezone();
        let date = after.date_naive();

        let today = resolve_local(&tz, date, self.0);
        if today >= *after {
            return today;
        }

        let tomorrow = date.succ_opt().unwrap_or(date);
        resolve_local(&tz, tomorrow, self.0)
    }

    /// Time remaining from `now` until the next occurrence of `self`.
    pub fn duration_until_next<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Duration {
        self.next_occurrence(now) - now.clone()
    }
}

/// Map a local date and time to an instant, stepping over DST gaps.
fn resolve_local<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Inside a DST gap: gaps are at most a few hours, probe forward
            // until a representable local time appears.
            (1..=4)
                .filter_map(|hours| {
                    tz.from_local_datetime(&(naive + Duration::hours(hours)))
                        .earliest()
                })
                .next()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        }
    }
}

impl Add<Duration> for TimeOfDay {
    type Output = TimeOfDay;

    fn add(self, rhs: Duration) -> TimeOfDay {
        let secs = (self.seconds_from_midnight() + rhs.num_seconds()).rem_euclid(SECONDS_PER_DAY);
        // rem_euclid keeps secs inside one day, so the conversion is infallible
        TimeOfDay(
            NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0).unwrap_or(NaiveTime::MIN),
        )
    }
}

impl Sub<Duration> for TimeOfDay {
    type Output = TimeOfDay;

    fn sub(self, rhs: Duration) -> TimeOfDay {
        self + (-rhs)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Accepts `HH:MM:SS` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self)
            .map_err(|e| format!("Invalid time '{s}': {e}. Use HH:MM:SS"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn tod(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_accepts_both_formats() {
        assert_eq!(tod("06:30"), tod("06:30:00"));
        assert!("25:00:00".parse::<TimeOfDay>().is_err());
        assert!("sunrise".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_arithmetic_wraps_around_midnight() {
        assert_eq!(tod("23:30:00") + Duration::hours(1), tod("00:30:00"));
        assert_eq!(tod("00:15:00") - Duration::minutes(30), tod("23:45:00"));
        assert_eq!(tod("12:00:00") + Duration::hours(48), tod("12:00:00"));
    }

    #[test]
    fn test_until_is_forward_distance() {
        assert_eq!(tod("22:00:00").until(tod("02:00:00")), Duration::hours(4));
        assert_eq!(tod("02:00:00").until(tod("22:00:00")), Duration::hours(20));
        assert_eq!(tod("05:00:00").until(tod("05:00:00")), Duration::zero());
    }

    #[test]
    fn test_next_occurrence_same_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap();
        let next = tod("06:00:00").next_occurrence(&now);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_next_occurrence_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap();
        assert_eq!(tod("06:00:00").next_occurrence(&now), now);
    }

    #[test]
    fn test_next_occurrence_wraps_to_tomorrow() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        let next = tod("06:00:00").next_occurrence(&now);
        assert_eq!(next, tz.with_ymd_and_hms(2025, 1, 1, 6, 0, 0).unwrap());
        assert_eq!(tod("06:00:00").duration_until_next(&now), Duration::hours(7));
    }

    #[test]
    fn test_next_occurrence_inside_dst_gap() {
        // 02:30 does not exist on 2024-03-10 in New York
        let tz = chrono_tz::America::New_York;
        let now = tz.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let next = tod("02:30:00").next_occurrence(&now);
        assert!(next > now);
        assert_eq!(next.time(), NaiveTime::from_hms_opt(3, 30, 0).unwrap());
    }

    #[test]
    fn test_serde_uses_clock_strings() {
        #[derive(Deserialize, Serialize)]
        struct Wrapper {
            at: TimeOfDay,
        }
        let parsed: Wrapper = toml::from_str("at = \"19:45:00\"").unwrap();
        assert_eq!(parsed.at, tod("19:45:00"));
        let written = toml::to_string(&parsed).unwrap();
        assert!(written.contains("\"19:45:00\""));
    }
}
