//! Configuration module for stepper-bench.
//!
//! Timer, pulse, serial and sense-line settings, loaded from TOML files (with the
//! `std` feature) or taken from [`ControllerConfig::default`] on bare-metal targets.

mod controller;
#[cfg(feature = "std")]
mod loader;
mod sense;
pub mod units;
mod validation;

pub use controller::{ControllerConfig, SerialConfig, DEFAULT_TIMER_FREQUENCY};
pub use sense::{LinePolarity, SenseConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Hertz, StepsPerSec, TimerTicks};
