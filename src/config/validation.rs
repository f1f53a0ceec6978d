//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::ControllerConfig;

/// Validate a controller configuration.
///
/// Checks:
/// - Timer tick frequency is non-zero
/// - Step pulse width is non-zero
/// - Baud rate is non-zero
pub fn validate_config(config: &ControllerConfig) -> Result<()> {
    if config.timer_frequency.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidTimerFrequency(
            config.timer_frequency.0,
        )));
    }

    // Drivers need a minimum trigger width
    if config.step_pulse_width_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(
            config.step_pulse_width_us,
        )));
    }

    if config.serial.baud_rate == 0 {
        return Err(Error::Config(ConfigError::InvalidBaudRate(
            config.serial.baud_rate,
        )));
    }

    Ok(())
}
