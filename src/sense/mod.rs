//! Sense-line module for stepper-bench.
//!
//! Forward-limit, home and reverse-limit inputs, per-line polarity and the
//! edge-detecting monitor that stops motion or captures home.

mod inputs;
mod line;
mod monitor;

pub use inputs::SenseInputs;
pub use line::{classify, LineState, SenseAction, SenseLine, SenseSnapshot};
pub use monitor::{apply, SenseActions, SenseEvent, SenseLineMonitor};
