//! # gammacycle Library
//!
//! Display color cycle engine driven by sunrise and sunset.
//!
//! This library exists to enable testing of the engine internals and to keep
//! a clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Engine**: [`crate::core::CycleEngine`] owns the tick cadence, activity flags and
//!   offsets, and publishes the current configuration
//! - **Cycle Math**: `core::period`, `core::smoothing` and `core::offsets` hold
//!   the pure calculations the engine is built from
//! - **Time**: `time` module for time-of-day values, wall clock and preview clock
//! - **Geographic**: `geo` module for sunrise/sunset calculations
//! - **Configuration**: `config` module for TOML-based settings with hot-reload
//! - **Collaborators**: `backend` (gamma sink) and `io` (foreground queries,
//!   hotkeys, signals) define the seams to the host system

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

// Public API modules
pub mod args;
pub mod backend;
pub mod config;
pub mod constants;
pub mod core;
pub mod geo;
pub mod io;
pub mod time;

// Re-export for binary and embedders
pub use crate::core::{CycleEngine, CycleSnapshot, EngineParams};
