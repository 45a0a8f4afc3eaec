//! Geographic sunrise/sunset calculations.
//!
//! - [`solar`]: astronomical sunrise/sunset with manual fallback
//! - [`display`]: human-readable summaries for the log

pub mod display;
pub mod solar;

pub use display::log_solar_summary;
pub use solar::{
    GeoLocation, SolarSource, SolarTimes, calculate_solar_times, compute_solar_times,
    resolve_solar_times,
};
