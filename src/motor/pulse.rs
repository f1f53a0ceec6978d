//! Step pulse generation.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::ControllerConfig;
use crate::error::{MotionError, Result};
use crate::motion::{MotionController, SharedMotion};

use super::driver::DriverControl;
use super::timer::PulseTimer;

/// What one timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// One step pulse was emitted.
    Stepped {
        /// Position after the step.
        position: i32,
    },
    /// Nothing left to do; the controller was stopped.
    Stopped,
}

/// Timer-interrupt handler that emits step pulses.
///
/// Owns the STEP pin. On each tick it either pulses once and accounts for the step,
/// or stops the controller when the requested count has been reached.
pub struct StepPulseGenerator<STEP, DELAY>
where
    STEP: OutputPin,
    DELAY: DelayNs,
{
    step_pin: STEP,
    delay: DELAY,
    /// High and low phase width.
    pulse_width_us: u32,
}

impl<STEP, DELAY> StepPulseGenerator<STEP, DELAY>
where
    STEP: OutputPin,
    DELAY: DelayNs,
{
    /// Create a generator using the configured pulse width.
    pub fn new(step_pin: STEP, delay: DELAY, config: &ControllerConfig) -> Self {
        Self {
            step_pin,
            delay,
            pulse_width_us: config.step_pulse_width_us,
        }
    }

    /// Handle one timer tick.
    ///
    /// Runs entirely inside the shared controller's critical section, so the pulse
    /// and the position update are never split by a sense-line stop.
    pub fn on_tick<DRV, TMR, DLY>(&mut self, motion: &SharedMotion<DRV, TMR, DLY>) -> Result<TickOutcome>
    where
        DRV: DriverControl,
        TMR: PulseTimer,
        DLY: DelayNs,
    {
        motion.with(|ctl| self.service(ctl))
    }

    /// Tick against a controller the caller already has exclusive access to.
    pub fn service<DRV, TMR, DLY>(
        &mut self,
        ctl: &mut MotionController<DRV, TMR, DLY>,
    ) -> Result<TickOutcome>
    where
        DRV: DriverControl,
        TMR: PulseTimer,
        DLY: DelayNs,
    {
        if ctl.step_pending() {
            self.pulse()?;
            let position = ctl.record_step();
            trace!("step -> {}", position);
            Ok(TickOutcome::Stepped { position })
        } else {
            ctl.stop()?;
            Ok(TickOutcome::Stopped)
        }
    }

    fn pulse(&mut self) -> Result<()> {
        self.step_pin.set_high().map_err(|_| MotionError::PinError)?;
        self.delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low().map_err(|_| MotionError::PinError)?;
        self.delay.delay_us(self.pulse_width_us);
        Ok(())
    }

    /// Give the pin and delay back.
    pub fn release(self) -> (STEP, DELAY) {
        (self.step_pin, self.delay)
    }
}
