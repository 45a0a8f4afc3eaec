//! State change detection and logging for cycle states.
//!
//! The engine classifies its state on every fast tick. This module decides
//! whether the newly classified state differs from the last announced one in a
//! way worth printing, and prints it in a consistent format.

use crate::core::period::CycleState;

/// Represents the type of state change that occurred.
#[derive(Debug, PartialEq)]
pub enum StateChange {
    /// No change occurred
    None,
    /// Left a resting state and started moving
    TransitionStarted,
    /// Finished moving and settled into a resting state
    TransitionCompleted { to: CycleState },
    /// Disabled or paused from any other state
    Suspended { to: CycleState },
    /// Direct jump between day and night without a transition in between
    StableJump { from: CycleState, to: CycleState },
}

/// Detect what type of state change occurred between two states.
///
/// `previous` is `None` before the first announcement, in which case any state
/// counts as a change worth reporting.
pub fn detect_state_change(previous: Option<CycleState>, new_state: CycleState) -> StateChange {
    let Some(previous) = previous else {
        return match new_state {
            CycleState::Transition => StateChange::TransitionStarted,
            CycleState::Disabled | CycleState::Paused => StateChange::Suspended { to: new_state },
            to => StateChange::TransitionCompleted { to },
        };
    };

    match (previous, new_state) {
        (from, to) if from == to => StateChange::None,

        (_, to @ (CycleState::Disabled | CycleState::Paused)) => StateChange::Suspended { to },

        (_, CycleState::Transition) => StateChange::TransitionStarted,

        (from @ (CycleState::Day | CycleState::Night), to @ (CycleState::Day | CycleState::Night)) => {
            StateChange::StableJump { from, to }
        }

        (_, to) => StateChange::TransitionCompleted { to },
    }
}

/// Detect the change and log it. Returns the detected change.
pub fn announce_state_change(previous: Option<CycleState>, new_state: CycleState) -> StateChange {
    let change = detect_state_change(previous, new_state);
    log_state_change(&change);
    change
}

/// Log the appropriate message for a state change.
fn log_state_change(change: &StateChange) {
    match change {
        StateChange::None => {}
        StateChange::TransitionStarted => {
            log_block_start!(
                "Commencing {} {}",
                CycleState::Transition.display_name().to_lowercase(),
                CycleState::Transition.symbol()
            );
        }
        StateChange::TransitionCompleted { to } => {
            log_block_start!(
                "Entering {} mode {}",
                to.display_name().to_lowercase(),
                to.symbol()
            );
        }
        StateChange::Suspended { to } => {
            log_block_start!("{} {}", to.display_name(), to.symbol());
        }
        StateChange::StableJump { from, to } => {
            // Happens with zero-length transitions or after a clock change
            log_decorated!(
                "Switched from {} to {}",
                from.display_name().to_lowercase(),
                to.display_name().to_lowercase()
            );
            log_block_start!(
                "Entering {} mode {}",
                to.display_name().to_lowercase(),
                to.symbol()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_state_is_no_change() {
        assert_eq!(
            detect_state_change(Some(CycleState::Night), CycleState::Night),
            StateChange::None
        );
    }

    #[test]
    fn test_first_state_is_always_reported() {
        assert_eq!(
            detect_state_change(None, CycleState::Day),
            StateChange::TransitionCompleted {
                to: CycleState::Day
            }
        );
        assert_eq!(
            detect_state_change(None, CycleState::Transition),
            StateChange::TransitionStarted
        );
    }

    #[test]
    fn test_normal_flow() {
        assert_eq!(
            detect_state_change(Some(CycleState::Day), CycleState::Transition),
            StateChange::TransitionStarted
        );
        assert_eq!(
            detect_state_change(Some(CycleState::Transition), CycleState::Night),
            StateChange::TransitionCompleted {
                to: CycleState::Night
            }
        );
    }

    #[test]
    fn test_suspension() {
        assert_eq!(
            detect_state_change(Some(CycleState::Day), CycleState::Paused),
            StateChange::Suspended {
                to: CycleState::Paused
            }
        );
    }

    #[test]
    fn test_direct_stable_jump() {
        assert_eq!(
            detect_state_change(Some(CycleState::Night), CycleState::Day),
            StateChange::StableJump {
                from: CycleState::Night,
                to: CycleState::Day
            }
        );
    }
}
