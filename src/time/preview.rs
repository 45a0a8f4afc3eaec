//! Accelerated instant source for previewing a full day/night cycle.
//!
//! While a preview runs, each fast tick moves the simulated instant a fixed
//! amount of simulated time toward "one day from now". The engine keeps
//! computing targets from that instant, so the sink shows a whole cycle in a
//! few seconds. Once the simulated instant catches up with its target the
//! preview ends on its own and the instant snaps back to the wall clock.

use chrono::{DateTime, Duration, Local};

use crate::constants::{PREVIEW_SPAN_HOURS, PREVIEW_STEP_MINUTES};

/// Outcome of advancing the instant for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStep {
    /// Preview is not running, instant follows the wall clock.
    Idle,
    /// Preview advanced and is still running.
    Advanced,
    /// Preview reached its target on this tick and is now stopped.
    Finished,
}

/// Simulated-time stepper for cycle preview.
#[derive(Debug, Clone)]
pub struct PreviewClock {
    active: bool,
    step: Duration,
    span: Duration,
}

impl Default for PreviewClock {
    fn default() -> Self {
        Self::new(
            Duration::minutes(PREVIEW_STEP_MINUTES),
            Duration::hours(PREVIEW_SPAN_HOURS),
        )
    }
}

impl PreviewClock {
    pub fn new(step: Duration, span: Duration) -> Self {
        Self {
            active: false,
            step,
            span,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start previewing. The simulated instant continues from wherever it is.
    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Produce the next instant.
    ///
    /// Inactive: returns `real_now` unchanged. Active: moves `instant` toward
    /// `real_now + span` by at most one step, never past it, and deactivates
    /// once the target is reached. The following tick is back on the wall
    /// clock.
    pub fn advance(
        &mut self,
        instant: DateTime<Local>,
        real_now: DateTime<Local>,
    ) -> (DateTime<Local>, PreviewStep) {
        if !self.active {
            return (real_now, PreviewStep::Idle);
        }

        let target = real_now + self.span;
        let next = step_to(instant, target, self.step);

        if next >= target {
            self.active = false;
            (next, PreviewStep::Finished)
        } else {
            (next, PreviewStep::Advanced)
        }
    }
}

/// Move `from` toward `to` by at most `max_step`, never overshooting.
fn step_to(from: DateTime<Local>, to: DateTime<Local>, max_step: Duration) -> DateTime<Local> {
    if from >= to || to - from <= max_step {
        to
    } else {
        from + max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_inactive_tracks_wall_clock() {
        let mut clock = PreviewClock::default();
        let real = noon() + Duration::seconds(3);
        let (instant, step) = clock.advance(noon(), real);
        assert_eq!(instant, real);
        assert_eq!(step, PreviewStep::Idle);
    }

    #[test]
    fn test_active_advances_one_step() {
        let mut clock = PreviewClock::default();
        clock.start();
        let (instant, step) = clock.advance(noon(), noon());
        assert_eq!(instant, noon() + Duration::minutes(5));
        assert_eq!(step, PreviewStep::Advanced);
        assert!(clock.is_active());
    }

    #[test]
    fn test_preview_terminates_at_target() {
        let mut clock = PreviewClock::default();
        clock.start();

        let real = noon();
        let target = real + Duration::days(1);
        let mut instant = real;
        let mut ticks = 0;

        loop {
            let previous = instant;
            let (next, step) = clock.advance(instant, real);
            ticks += 1;
            if step == PreviewStep::Finished {
                assert_eq!(next, target);
                break;
            }
            assert!(next - previous <= Duration::minutes(5));
            assert!(next < target);
            instant = next;
        }

        assert_eq!(ticks, 24 * 60 / 5);
        assert!(!clock.is_active());

        // Reverts to the wall clock once done
        let (after, step) = clock.advance(target, real);
        assert_eq!(after, real);
        assert_eq!(step, PreviewStep::Idle);
    }

    #[test]
    fn test_step_to_never_overshoots() {
        let to = noon() + Duration::minutes(3);
        assert_eq!(step_to(noon(), to, Duration::minutes(5)), to);
        assert_eq!(step_to(to, noon(), Duration::minutes(5)), noon());
    }
}
