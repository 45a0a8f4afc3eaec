//! Structured terminal logging with box-drawing decoration.
//!
//! Every line the engine prints goes through the macros defined here so the
//! output keeps one visual style:
//!
//! ```text
//! ┏ gammacycle v0.3.0 ━━╸
//! ┃
//! ┣ Loading configuration
//! ┃   Sunrise: 06:12:40 (calculated)
//! ┃
//! ┣ Entering night mode
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - **`log_block_start!`** opens a new conceptual block (state changes, preview
//!   start, settings reload). It prints a spacing pipe followed by `┣ message`.
//! - **`log_decorated!`** continues the current block with `┣ message`.
//! - **`log_indented!`** prints nested details as `┃   message`.
//! - **`log_pipe!`** inserts a bare `┃` before a semantic message that starts
//!   its own block. Not for use at the end of a block.
//! - **`log_version!`** / **`log_end!`** frame the whole run.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`** carry a
//!   colored `[LEVEL]` tag instead of plain decoration.
//!
//! Output can be silenced at runtime with [`Log::set_enabled`], which tests and
//! quiet embedding hosts use.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Global switch for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }
}

/// Write a single decorated line to stdout.
///
/// Public only so the exported macros can reach it.
#[doc(hidden)]
pub fn write_line(lead: &str, message: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{lead}{message}");
    let _ = stdout.flush();
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_emit {
    ($lead:expr, $fmt:literal $($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_line($lead, &format!($fmt $($arg)*));
        }
    }};
    ($lead:expr, $expr:expr) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_line($lead, &format!("{}", $expr));
        }
    }};
}

/// Log a message that continues the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($t:tt)*) => { $crate::__log_emit!("┣ ", $($t)*) };
}

/// Log a nested detail line.
#[macro_export]
macro_rules! log_indented {
    ($($t:tt)*) => { $crate::__log_emit!("┃   ", $($t)*) };
}

/// Log a message that opens a new block.
#[macro_export]
macro_rules! log_block_start {
    ($($t:tt)*) => { $crate::__log_emit!("┃\n┣ ", $($t)*) };
}

/// Log a bare pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => { $crate::__log_emit!("", "┃") };
}

/// Log the application header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_emit!("┏ ", "gammacycle v{} ━━╸", env!("CARGO_PKG_VERSION"))
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => { $crate::__log_emit!("", "╹") };
}

/// Log a warning with a yellow tag.
#[macro_export]
macro_rules! log_warning {
    ($($t:tt)*) => { $crate::__log_emit!("┣[\x1b[33mWARNING\x1b[0m] ", $($t)*) };
}

/// Log an error with a red tag.
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => { $crate::__log_emit!("┣[\x1b[31mERROR\x1b[0m] ", $($t)*) };
}

/// Log an informational message with a green tag.
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => { $crate::__log_emit!("┣[\x1b[32mINFO\x1b[0m] ", $($t)*) };
}

/// Log a debug message with a green tag.
#[macro_export]
macro_rules! log_debug {
    ($($t:tt)*) => { $crate::__log_emit!("┣[\x1b[32mDEBUG\x1b[0m] ", $($t)*) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_can_be_toggled() {
        let was_enabled = Log::is_enabled();
        Log::set_enabled(false);
        assert!(!Log::is_enabled());
        // Must not print or panic while disabled
        log_decorated!("hidden {}", 42);
        log_pipe!();
        Log::set_enabled(was_enabled);
    }
}
