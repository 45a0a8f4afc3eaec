//! Queries about the foreground application.
//!
//! The engine polls these once per slow tick to decide whether the cycle
//! should pause. How the answers are obtained (window manager IPC, desktop
//! portals, a test double) is up to the implementation.

/// Information about the application currently in the foreground.
///
/// Implementations are called while the engine state lock is held and must
/// not block for long.
pub trait ForegroundQuery: Send {
    /// Whether the foreground window covers its whole display.
    fn is_foreground_full_screen(&self) -> bool;

    /// An identity for the foreground application, compared against the
    /// whitelist. `None` when it cannot be determined.
    fn foreground_application(&self) -> Option<String>;
}

/// Foreground query for hosts with no window information.
///
/// Never reports full screen and never identifies an application, so it never
/// causes a pause.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoForeground;

impl ForegroundQuery for NoForeground {
    fn is_foreground_full_screen(&self) -> bool {
        false
    }

    fn foreground_application(&self) -> Option<String> {
        None
    }
}
