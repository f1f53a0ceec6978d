//! Motion controller.
//!
//! Owns the [`MotionState`] together with the hardware it has to keep in step with:
//! driver outputs, step timer and the delay used while the driver powers up.
//! Normally reached through [`SharedMotion`](super::SharedMotion), which serializes
//! the command loop and both interrupt handlers.

use embedded_hal::delay::DelayNs;

use crate::config::units::{Hertz, StepsPerSec, TimerTicks};
use crate::config::ControllerConfig;
use crate::error::{MotionError, Result};
use crate::motor::{DriverControl, PulseTimer};

use super::direction::Direction;
use super::state::MotionState;

/// Point-in-time copy of the controller for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStatus {
    /// Position in steps.
    pub position: i32,
    /// Last captured home position.
    pub home: i32,
    /// Operator step count.
    pub steps_target: u16,
    /// Step count of the active move.
    pub steps_requested: u16,
    /// Steps emitted since the last start.
    pub steps_done: u16,
    /// Configured rate.
    pub rate: Option<StepsPerSec>,
    /// Timer period for the configured rate.
    pub period: Option<TimerTicks>,
    /// Current direction.
    pub direction: Direction,
    /// Pulse generator armed.
    pub running: bool,
    /// Driver powered.
    pub energized: bool,
}

/// Single-axis motion controller.
///
/// Generic over:
/// - `DRV`: driver outputs (must implement [`DriverControl`])
/// - `TMR`: step timer (must implement [`PulseTimer`])
/// - `DLY`: delay provider for the power-up settle time
pub struct MotionController<DRV, TMR, DLY>
where
    DRV: DriverControl,
    TMR: PulseTimer,
    DLY: DelayNs,
{
    state: MotionState,
    driver: DRV,
    timer: TMR,
    delay: DLY,
    timer_frequency: Hertz,
    power_settle_ms: u32,
    energized: bool,
}

impl<DRV, TMR, DLY> MotionController<DRV, TMR, DLY>
where
    DRV: DriverControl,
    TMR: PulseTimer,
    DLY: DelayNs,
{
    /// Create a controller and put the outputs in their power-on state:
    /// direction forward, driver de-energized, timer disarmed.
    pub fn new(mut driver: DRV, mut timer: TMR, delay: DLY, config: &ControllerConfig) -> Result<Self> {
        timer.disarm();
        driver.set_direction(Direction::Forward)?;
        driver.de_energize()?;

        Ok(Self {
            state: MotionState::new(),
            driver,
            timer,
            delay,
            timer_frequency: config.timer_frequency,
            power_settle_ms: config.power_settle_ms,
            energized: false,
        })
    }

    /// Current motion bookkeeping.
    #[inline]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Tick frequency the periods are computed against.
    #[inline]
    pub fn timer_frequency(&self) -> Hertz {
        self.timer_frequency
    }

    /// Snapshot for reporting.
    pub fn status(&self) -> MotionStatus {
        MotionStatus {
            position: self.state.position(),
            home: self.state.home(),
            steps_target: self.state.steps_target(),
            steps_requested: self.state.steps_requested(),
            steps_done: self.state.steps_done(),
            rate: self.state.rate(),
            period: self.state.period(),
            direction: self.state.direction(),
            running: self.state.is_running(),
            energized: self.energized,
        }
    }

    /// Set the step rate.
    ///
    /// The period is `timer_frequency / steps_per_second` ticks and is loaded into
    /// the timer straight away; a running move picks it up on its next period.
    ///
    /// # Errors
    ///
    /// `InvalidRate` for zero, or for a rate whose period does not fit the compare
    /// register. The previous rate is kept.
    pub fn configure_rate(&mut self, steps_per_second: u16) -> Result<TimerTicks> {
        let rate = StepsPerSec(steps_per_second);
        let period = self
            .timer_frequency
            .period_for(rate)
            .ok_or(MotionError::InvalidRate(steps_per_second))?;

        self.state.set_rate(rate, period);
        self.timer.set_period(period);
        debug!("rate {} steps/s, period {} ticks", steps_per_second, period.0);
        Ok(period)
    }

    /// Set the direction and drive the direction output and indicator.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.driver.set_direction(direction)?;
        self.state.set_direction(direction);
        debug!("direction {}", direction.as_char());
        Ok(())
    }

    /// Set the number of steps for the next move.
    ///
    /// # Errors
    ///
    /// `Busy` while a move is running.
    pub fn request_steps(&mut self, steps: u16) -> Result<()> {
        self.state.request_steps(steps)?;
        debug!("{} steps requested", steps);
        Ok(())
    }

    /// Start a move of the requested number of steps at the configured rate.
    ///
    /// Disarms the timer, resets the counters, reloads the period, powers the
    /// driver and waits for it to settle, then marks the move running and arms the
    /// timer. Callers hold the critical section for the whole sequence.
    ///
    /// # Errors
    ///
    /// `NoRateConfigured` without a rate, `NoStepsRequested` for a zero step count.
    /// Nothing is changed in either case.
    pub fn start(&mut self) -> Result<()> {
        let period = self.state.start_period()?;

        self.timer.disarm();
        self.state.reset_for_start();
        self.timer.set_period(period);

        if let Err(e) = self.driver.energize() {
            self.state.halt();
            return Err(e);
        }
        self.energized = true;
        self.delay.delay_ms(self.power_settle_ms);

        self.state.mark_running();
        self.timer.arm();
        info!(
            "start: {} steps at {} ticks/step",
            self.state.steps_requested(),
            period.0
        );
        Ok(())
    }

    /// Stop motion and de-energize the driver.
    ///
    /// Always disarms the timer and clears the active request, even if the enable
    /// pin fails; that failure is returned afterwards. Safe to call repeatedly.
    pub fn stop(&mut self) -> Result<()> {
        let powered_down = self.driver.de_energize();
        self.timer.disarm();

        if self.state.is_running() {
            info!(
                "stop at position {} after {} steps",
                self.state.position(),
                self.state.steps_done()
            );
        }
        self.state.halt();

        powered_down?;
        self.energized = false;
        Ok(())
    }

    /// Capture the current position as home.
    pub fn record_home(&mut self) -> i32 {
        let home = self.state.record_home();
        info!("home recorded at {}", home);
        home
    }

    /// Power the driver without stepping, for setting the current limit.
    ///
    /// # Errors
    ///
    /// `Busy` while a move is running.
    pub fn hold_current(&mut self) -> Result<()> {
        if self.state.is_running() {
            return Err(MotionError::Busy.into());
        }
        self.driver.energize()?;
        self.energized = true;
        Ok(())
    }

    /// Leave current-tuning mode.
    ///
    /// # Errors
    ///
    /// `Busy` while a move is running; the driver stays powered for it.
    pub fn release_current(&mut self) -> Result<()> {
        if self.state.is_running() {
            return Err(MotionError::Busy.into());
        }
        self.driver.de_energize()?;
        self.energized = false;
        Ok(())
    }

    #[inline]
    pub(crate) fn step_pending(&self) -> bool {
        self.state.step_pending()
    }

    pub(crate) fn record_step(&mut self) -> i32 {
        self.state.record_step()
    }

    /// Take the hardware back.
    pub fn release(self) -> (DRV, TMR, DLY) {
        (self.driver, self.timer, self.delay)
    }
}
