//! # stepper-bench
//!
//! Firmware core for a single-axis stepper motor test bench, built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Serial command interface**: one-letter commands to set rate, step count and
//!   direction, start and stop motion, and print status
//! - **Timer-driven stepping**: one STEP pulse per timer tick, period derived from
//!   the requested steps per second
//! - **Sense lines**: forward and reverse limits stop motion, the home line captures
//!   the current position
//! - **Interrupt-safe state**: every context reaches the controller through one
//!   `critical_section` mutex
//! - **no_std compatible**: the core works without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_bench::{
//!     CommandInterpreter, ControllerConfig, DriverOutputs, MotionController, SharedMotion,
//! };
//!
//! static MOTION: SharedMotion<Driver, Timer1, Delay> = SharedMotion::new();
//!
//! let config = ControllerConfig::default();
//! let driver = DriverOutputs::new(dir_pin, enable_pin, led_pin, config.invert_direction);
//! MOTION.install(MotionController::new(driver, timer1, delay, &config)?);
//!
//! let mut cli = CommandInterpreter::new(uart, &config.serial);
//! cli.banner()?;
//! cli.run(&MOTION);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML configuration files
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Heapless error strings make the error type large
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod sense;

#[cfg(test)]
mod testing;

// Re-exports for ergonomic API
pub use command::{CommandInterpreter, SerialPort};
pub use config::{validate_config, ControllerConfig, LinePolarity, SenseConfig, SerialConfig};
pub use error::{Error, Result};
pub use motion::{Direction, MotionController, MotionStatus, SharedMotion};
pub use motor::{DriverControl, DriverOutputs, PulseTimer, StepPulseGenerator, TickOutcome};
pub use sense::{SenseEvent, SenseInputs, SenseLine, SenseLineMonitor};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Hertz, StepsPerSec, TimerTicks};
