//! Cycle phase and state calculation.
//!
//! This module turns solar times into transition windows, computes the target
//! configuration for any time of day, and classifies what the engine is
//! currently doing for presentation purposes.
//!
//! ## Key Functionality
//! - **Window Arithmetic**: boundaries, midnight-crossing range checks, progress
//! - **Interpolation**: blending day and night configurations inside windows
//! - **State Classification**: the user-facing [`CycleState`]
//! - **Announcements**: consistent log messages when the state changes

pub mod calculations;
pub mod interpolation;
pub mod state_detection;

pub use calculations::{
    CycleBoundaries, compute_boundaries, is_daytime, is_time_in_range, window_progress,
};
pub use interpolation::{CyclePhase, cycle_phase, interpolate_phase, target_configuration};
pub use state_detection::{StateChange, announce_state_change, detect_state_change};

use std::fmt;

use crate::core::color::ColorConfiguration;

/// What the engine is doing right now.
///
/// Derived on demand from the configurations and activity flags; never stored
/// as the source of truth.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum CycleState {
    /// Steady at the offset-adjusted day configuration
    Day,

    /// Steady at the offset-adjusted night configuration
    Night,

    /// Moving toward the target, or resting somewhere between day and night
    Transition,

    /// Enabled, but suspended by the foreground application
    Paused,

    /// Turned off by the user
    Disabled,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl CycleState {
    /// Returns the display name for this state (without icon).
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
            Self::Transition => "Transition",
            Self::Paused => "Paused",
            Self::Disabled => "Disabled",
        }
    }

    /// Returns the icon/symbol for this state.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Day => "󰖨 ",
            Self::Night => " ",
            Self::Transition => "󰖛 ",
            Self::Paused => "󰏤 ",
            Self::Disabled => "󰂲 ",
        }
    }

    /// Returns true for the two resting states.
    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Day | Self::Night)
    }
}

/// Inputs needed to classify the cycle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateInputs {
    pub current: ColorConfiguration,
    pub target: ColorConfiguration,
    pub adjusted_day: ColorConfiguration,
    pub adjusted_night: ColorConfiguration,
    pub enabled: bool,
    pub paused: bool,
}

/// Classify the cycle state.
///
/// Checked in priority order: an unfinished ease is always a transition, even
/// while disabled or paused (the display is still moving). Once settled, the
/// activity flags win over the configuration comparison. A settled value that
/// matches neither day nor night is reported as a transition.
pub fn classify_cycle_state(inputs: &StateInputs) -> CycleState {
    if inputs.current != inputs.target {
        CycleState::Transition
    } else if !inputs.enabled {
        CycleState::Disabled
    } else if inputs.paused {
        CycleState::Paused
    } else if inputs.current == inputs.adjusted_day {
        CycleState::Day
    } else if inputs.current == inputs.adjusted_night {
        CycleState::Night
    } else {
        CycleState::Transition
    }
}
