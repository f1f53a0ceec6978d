//! Interrupt-safe home for the motion controller.
//!
//! The command loop, the step timer interrupt and the sense-line interrupt all
//! reach the controller through one `critical_section::Mutex`. Every operation is
//! a single critical section, so a tick can never observe a half-done start.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

use crate::error::{MotionError, Result};
use crate::motor::{DriverControl, PulseTimer};

use super::controller::{MotionController, MotionStatus};
use super::direction::Direction;
use crate::config::units::TimerTicks;

/// Shared [`MotionController`] slot.
///
/// `new` is `const`, so the slot can be a `static` that interrupt handlers name
/// directly; the controller is installed once the pins are set up.
///
/// # Example
///
/// ```rust,ignore
/// static MOTION: SharedMotion<Driver, Timer1, Delay> = SharedMotion::new();
///
/// MOTION.install(MotionController::new(driver, timer, delay, &config)?);
/// MOTION.configure_rate(100)?;
/// MOTION.request_steps(50)?;
/// MOTION.start()?;
/// ```
pub struct SharedMotion<DRV, TMR, DLY>
where
    DRV: DriverControl,
    TMR: PulseTimer,
    DLY: DelayNs,
{
    inner: Mutex<RefCell<Option<MotionController<DRV, TMR, DLY>>>>,
}

impl<DRV, TMR, DLY> Default for SharedMotion<DRV, TMR, DLY>
where
    DRV: DriverControl,
    TMR: PulseTimer,
    DLY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DRV, TMR, DLY> SharedMotion<DRV, TMR, DLY>
where
    DRV: DriverControl,
    TMR: PulseTimer,
    DLY: DelayNs,
{
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Create a slot holding `controller`.
    pub fn with_controller(controller: MotionController<DRV, TMR, DLY>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Some(controller))),
        }
    }

    /// Install the controller, returning any previous one.
    pub fn install(
        &self,
        controller: MotionController<DRV, TMR, DLY>,
    ) -> Option<MotionController<DRV, TMR, DLY>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(controller))
    }

    /// Remove the controller.
    pub fn take(&self) -> Option<MotionController<DRV, TMR, DLY>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Run `f` on the controller inside one critical section.
    ///
    /// `f` must not call back into this `SharedMotion`.
    ///
    /// # Errors
    ///
    /// `NotInitialized` when nothing is installed, otherwise whatever `f` returns.
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut MotionController<DRV, TMR, DLY>) -> Result<R>,
    {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            let controller = slot.as_mut().ok_or(MotionError::NotInitialized)?;
            f(controller)
        })
    }

    /// See [`MotionController::configure_rate`].
    pub fn configure_rate(&self, steps_per_second: u16) -> Result<TimerTicks> {
        self.with(|ctl| ctl.configure_rate(steps_per_second))
    }

    /// See [`MotionController::set_direction`].
    pub fn set_direction(&self, direction: Direction) -> Result<()> {
        self.with(|ctl| ctl.set_direction(direction))
    }

    /// See [`MotionController::request_steps`].
    pub fn request_steps(&self, steps: u16) -> Result<()> {
        self.with(|ctl| ctl.request_steps(steps))
    }

    /// See [`MotionController::start`]. The whole sequence is one transaction.
    pub fn start(&self) -> Result<()> {
        self.with(|ctl| ctl.start())
    }

    /// See [`MotionController::stop`].
    pub fn stop(&self) -> Result<()> {
        self.with(|ctl| ctl.stop())
    }

    /// See [`MotionController::record_home`].
    pub fn record_home(&self) -> Result<i32> {
        self.with(|ctl| Ok(ctl.record_home()))
    }

    /// See [`MotionController::hold_current`].
    pub fn hold_current(&self) -> Result<()> {
        self.with(|ctl| ctl.hold_current())
    }

    /// See [`MotionController::release_current`].
    pub fn release_current(&self) -> Result<()> {
        self.with(|ctl| ctl.release_current())
    }

    /// Snapshot for reporting.
    pub fn status(&self) -> Result<MotionStatus> {
        self.with(|ctl| Ok(ctl.status()))
    }

    /// Whether a move is running. `false` when nothing is installed.
    pub fn is_running(&self) -> bool {
        self.status().map(|s| s.running).unwrap_or(false)
    }
}
