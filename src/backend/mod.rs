//! Output abstraction for applying color configurations to displays.
//!
//! The engine never talks to display hardware directly. Every fast tick it
//! hands the current configuration to a [`GammaSink`], which is free to turn
//! it into gamma ramps, a compositor request or nothing at all.
//!
//! The binary ships [`LoggingSink`], which prints configuration changes and is
//! useful for checking a schedule without touching the display.

use crate::core::color::ColorConfiguration;

/// Destination for the configuration the engine wants on screen.
///
/// Called from the fast tick while the engine state lock is held, so
/// implementations must return promptly and must not call back into the
/// engine. Application is fire-and-forget: failures are the sink's concern.
pub trait GammaSink: Send {
    /// Apply a configuration to every managed display.
    fn apply_configuration(&mut self, configuration: ColorConfiguration);

    /// Short name for log output.
    fn backend_name(&self) -> &'static str {
        "custom"
    }
}

/// Sink that prints configuration changes to the log.
///
/// Repeated identical values are suppressed, as are changes too small to
/// show up in the rounded `3900K @ 85%` form.
#[derive(Debug, Default)]
pub struct LoggingSink {
    last_shown: Option<String>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GammaSink for LoggingSink {
    fn apply_configuration(&mut self, configuration: ColorConfiguration) {
        let shown = configuration.to_string();
        if self.last_shown.as_deref() == Some(shown.as_str()) {
            return;
        }
        log_indented!("Display: {}", shown);
        self.last_shown = Some(shown);
    }

    fn backend_name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_sink_suppresses_repeats() {
        let mut sink = LoggingSink::new();
        sink.apply_configuration(ColorConfiguration::new(3900.0, 0.85));
        assert_eq!(sink.last_shown.as_deref(), Some("3900K @ 85%"));

        // Rounds to the same display string
        sink.apply_configuration(ColorConfiguration::new(3900.2, 0.851));
        assert_eq!(sink.last_shown.as_deref(), Some("3900K @ 85%"));

        sink.apply_configuration(ColorConfiguration::new(4000.0, 0.9));
        assert_eq!(sink.last_shown.as_deref(), Some("4000K @ 90%"));
    }
}
