//! Hotkey actions and the registration seam.
//!
//! The engine exposes each hotkey as a plain [`HotkeyAction`]. Binding those
//! actions to physical key combinations belongs to a [`HotkeyRegistrar`]
//! supplied by the host.

use std::fmt;

/// Something a hotkey can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    Toggle,
    IncreaseTemperatureOffset,
    DecreaseTemperatureOffset,
    IncreaseBrightnessOffset,
    DecreaseBrightnessOffset,
    ResetOffset,
}

impl HotkeyAction {
    /// Every action, in registration order.
    pub const ALL: [HotkeyAction; 6] = [
        HotkeyAction::Toggle,
        HotkeyAction::IncreaseTemperatureOffset,
        HotkeyAction::DecreaseTemperatureOffset,
        HotkeyAction::IncreaseBrightnessOffset,
        HotkeyAction::DecreaseBrightnessOffset,
        HotkeyAction::ResetOffset,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Toggle => "Toggle",
            Self::IncreaseTemperatureOffset => "Increase temperature offset",
            Self::DecreaseTemperatureOffset => "Decrease temperature offset",
            Self::IncreaseBrightnessOffset => "Increase brightness offset",
            Self::DecreaseBrightnessOffset => "Decrease brightness offset",
            Self::ResetOffset => "Reset offsets",
        }
    }
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Callback invoked when a registered hotkey is pressed.
pub type HotkeyCallback = Box<dyn Fn() + Send + Sync>;

/// Binds key combinations to callbacks.
///
/// Callbacks may be invoked from any thread. They lock the engine, so a
/// registrar must not invoke them while the engine is calling into it.
pub trait HotkeyRegistrar: Send {
    /// Register `callback` for the key combination `binding` (e.g. `"Ctrl+Alt+F12"`).
    fn register(&mut self, binding: &str, callback: HotkeyCallback);

    /// Drop every registration made through this registrar.
    fn unregister_all(&mut self);
}

/// Registrar that records bindings and logs them without capturing keys.
///
/// Hosts without a global hotkey facility use it so the configured bindings
/// still show up in the log. Registered callbacks can be triggered by binding
/// through [`LoggingRegistrar::trigger`].
#[derive(Default)]
pub struct LoggingRegistrar {
    bindings: Vec<(String, HotkeyCallback)>,
}

impl LoggingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings currently registered, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(binding, _)| binding.as_str())
    }

    /// Invoke the callback registered for `binding`. Returns false if none is.
    pub fn trigger(&self, binding: &str) -> bool {
        match self.bindings.iter().find(|(b, _)| b == binding) {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for LoggingRegistrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingRegistrar")
            .field("bindings", &self.bindings().collect::<Vec<_>>())
            .finish()
    }
}

impl HotkeyRegistrar for LoggingRegistrar {
    fn register(&mut self, binding: &str, callback: HotkeyCallback) {
        log_indented!("Hotkey: {}", binding);
        self.bindings.push((binding.to_string(), callback));
    }

    fn unregister_all(&mut self) {
        self.bindings.clear();
    }
}
