//! Motor driver outputs.
//!
//! Generic over embedded-hal 1.0 output pins: direction, driver enable (the
//! driver's sleep line) and a status LED that mirrors the direction.

use embedded_hal::digital::OutputPin;

use crate::error::{MotionError, Result};
use crate::motion::Direction;

/// Outputs the motion controller drives, apart from the step line.
pub trait DriverControl {
    /// Drive the direction output and its status indicator.
    fn set_direction(&mut self, direction: Direction) -> Result<()>;

    /// Power the motor driver.
    fn energize(&mut self) -> Result<()>;

    /// Remove power from the motor driver.
    fn de_energize(&mut self) -> Result<()>;
}

/// [`DriverControl`] over three embedded-hal output pins.
///
/// Generic over:
/// - `DIR`: direction pin
/// - `EN`: driver enable pin, high while energized
/// - `LED`: status indicator, high while the direction is forward
pub struct DriverOutputs<DIR, EN, LED>
where
    DIR: OutputPin,
    EN: OutputPin,
    LED: OutputPin,
{
    dir_pin: DIR,
    enable_pin: EN,
    status_pin: LED,
    /// Whether direction pin logic is inverted.
    invert_direction: bool,
}

impl<DIR, EN, LED> DriverOutputs<DIR, EN, LED>
where
    DIR: OutputPin,
    EN: OutputPin,
    LED: OutputPin,
{
    /// Wrap the driver pins.
    pub fn new(dir_pin: DIR, enable_pin: EN, status_pin: LED, invert_direction: bool) -> Self {
        Self {
            dir_pin,
            enable_pin,
            status_pin,
            invert_direction,
        }
    }

    /// Give the pins back.
    pub fn release(self) -> (DIR, EN, LED) {
        (self.dir_pin, self.enable_pin, self.status_pin)
    }
}

impl<DIR, EN, LED> DriverControl for DriverOutputs<DIR, EN, LED>
where
    DIR: OutputPin,
    EN: OutputPin,
    LED: OutputPin,
{
    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        let forward = direction == Direction::Forward;
        let pin_high = forward != self.invert_direction;

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotionError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotionError::PinError)?;
        }

        // The indicator follows the logical direction, not the pin
        if forward {
            self.status_pin.set_high().map_err(|_| MotionError::PinError)?;
        } else {
            self.status_pin.set_low().map_err(|_| MotionError::PinError)?;
        }

        Ok(())
    }

    fn energize(&mut self) -> Result<()> {
        self.enable_pin.set_high().map_err(|_| MotionError::PinError)?;
        Ok(())
    }

    fn de_energize(&mut self) -> Result<()> {
        self.enable_pin.set_low().map_err(|_| MotionError::PinError)?;
        Ok(())
    }
}
