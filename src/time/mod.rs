//! Time handling: time-of-day values, the wall-clock abstraction and the
//! accelerated preview clock.

pub mod preview;
pub mod source;
pub mod time_of_day;

pub use preview::{PreviewClock, PreviewStep};
#[cfg(any(test, feature = "testing-support"))]
pub use source::ManualTimeSource;
pub use source::{RealTimeSource, TimeSource};
pub use time_of_day::TimeOfDay;
